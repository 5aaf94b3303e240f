use std::fmt::{Display, Formatter};
use std::str::FromStr;

use formwork_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

/// Supported entry (form field) types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryType {
    /// Free text, single or multiple lines.
    Text,
    /// Web address.
    Url,
    /// Email address.
    Email,
    /// Floating point number.
    Number,
    /// Whole number.
    Integer,
    /// On/off toggle.
    Checkbox,
}

impl EntryType {
    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Url => "url",
            Self::Email => "email",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Checkbox => "checkbox",
        }
    }

    /// Returns whether values of this type are booleans rather than text.
    #[must_use]
    pub fn is_checkbox(&self) -> bool {
        matches!(self, Self::Checkbox)
    }
}

impl FromStr for EntryType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "text" => Ok(Self::Text),
            "url" => Ok(Self::Url),
            "email" => Ok(Self::Email),
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "checkbox" => Ok(Self::Checkbox),
            _ => Err(AppError::Validation(format!("unknown entry type '{value}'"))),
        }
    }
}

impl Display for EntryType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Current value of an entry.
///
/// Checkbox entries hold a boolean, every other type holds trimmed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryValue {
    /// Checkbox state.
    Checked(bool),
    /// Text content.
    Text(String),
}

impl EntryValue {
    /// Returns the empty value for an entry type.
    #[must_use]
    pub fn empty_for(entry_type: EntryType) -> Self {
        if entry_type.is_checkbox() {
            Self::Checked(false)
        } else {
            Self::Text(String::new())
        }
    }

    /// Returns whether the value is an unchecked box or empty text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Checked(checked) => !checked,
            Self::Text(text) => text.is_empty(),
        }
    }

    /// Returns the text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Checked(_) => None,
        }
    }

    /// Returns whether this is a checked box.
    #[must_use]
    pub fn is_checked(&self) -> bool {
        matches!(self, Self::Checked(true))
    }

    fn matches_type(&self, entry_type: EntryType) -> bool {
        matches!(self, Self::Checked(_)) == entry_type.is_checkbox()
    }
}

impl Default for EntryValue {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<&str> for EntryValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for EntryValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for EntryValue {
    fn from(value: bool) -> Self {
        Self::Checked(value)
    }
}

/// Optional attributes for constructing one entry definition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryDefinitionInput {
    /// Whether an empty value is a problem.
    pub required: bool,
    /// Renders text entries as a multi-line control.
    pub multiple_lines: bool,
    /// Default value; the type's empty value when absent.
    pub value: Option<EntryValue>,
    /// Checkbox title shown while checked.
    pub title_when_on: Option<String>,
    /// Checkbox title shown while unchecked.
    pub title_when_off: Option<String>,
}

/// Immutable definition of one form entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDefinition {
    id: NonEmptyString,
    title: NonEmptyString,
    entry_type: EntryType,
    required: bool,
    multiple_lines: bool,
    value: EntryValue,
    title_when_on: Option<String>,
    title_when_off: Option<String>,
}

impl EntryDefinition {
    /// Creates a validated entry definition.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        entry_type: EntryType,
        input: EntryDefinitionInput,
    ) -> AppResult<Self> {
        let EntryDefinitionInput {
            required,
            multiple_lines,
            value,
            title_when_on,
            title_when_off,
        } = input;

        let id = NonEmptyString::new(id)?;

        if multiple_lines && entry_type != EntryType::Text {
            return Err(AppError::Validation(format!(
                "entry '{}' uses multipleLines but is of type '{}'",
                id, entry_type
            )));
        }

        if !entry_type.is_checkbox() && (title_when_on.is_some() || title_when_off.is_some()) {
            return Err(AppError::Validation(format!(
                "entry '{}' sets on/off titles but is not a checkbox",
                id
            )));
        }

        let value = value.unwrap_or_else(|| EntryValue::empty_for(entry_type));
        if !value.matches_type(entry_type) {
            return Err(AppError::Validation(format!(
                "default value of entry '{}' does not match entry type '{}'",
                id, entry_type
            )));
        }

        Ok(Self {
            id,
            title: NonEmptyString::new(title)?,
            entry_type,
            required,
            multiple_lines,
            value,
            title_when_on,
            title_when_off,
        })
    }

    /// Returns the entry identifier.
    #[must_use]
    pub fn id(&self) -> &NonEmptyString {
        &self.id
    }

    /// Returns the human-facing title.
    #[must_use]
    pub fn title(&self) -> &NonEmptyString {
        &self.title
    }

    /// Returns the entry type.
    #[must_use]
    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    /// Returns whether the entry must be filled.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns whether a text entry spans multiple lines.
    #[must_use]
    pub fn is_multiple_lines(&self) -> bool {
        self.multiple_lines
    }

    /// Returns the current (or default) value.
    #[must_use]
    pub fn value(&self) -> &EntryValue {
        &self.value
    }

    /// Returns the checkbox title while checked.
    #[must_use]
    pub fn title_when_on(&self) -> Option<&str> {
        self.title_when_on.as_deref()
    }

    /// Returns the checkbox title while unchecked.
    #[must_use]
    pub fn title_when_off(&self) -> Option<&str> {
        self.title_when_off.as_deref()
    }

    /// Returns a copy of this definition holding another current value.
    ///
    /// The value kind is coerced to the entry type: text stored into a
    /// checkbox counts as checked when non-empty.
    #[must_use]
    pub fn with_value(&self, value: EntryValue) -> Self {
        let value = match (self.entry_type.is_checkbox(), value) {
            (true, EntryValue::Text(text)) => EntryValue::Checked(!text.is_empty()),
            (false, EntryValue::Checked(checked)) => {
                EntryValue::Text(if checked { "1".to_owned() } else { String::new() })
            }
            (_, value) => value,
        };

        Self {
            value,
            ..self.clone()
        }
    }

    pub(crate) fn from_document(id: String, document: EntryDocument) -> AppResult<Self> {
        Self::new(
            id,
            document.title,
            document.entry_type,
            EntryDefinitionInput {
                required: document.required,
                multiple_lines: document.multiple_lines,
                value: document.value,
                title_when_on: document.title_when_on,
                title_when_off: document.title_when_off,
            },
        )
    }

    pub(crate) fn to_document(&self) -> EntryDocument {
        EntryDocument {
            title: self.title.as_str().to_owned(),
            entry_type: self.entry_type,
            required: self.required,
            multiple_lines: self.multiple_lines,
            value: Some(self.value.clone()),
            title_when_on: self.title_when_on.clone(),
            title_when_off: self.title_when_off.clone(),
        }
    }
}

/// Wire shape of one entry inside a schema document's `entries` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EntryDocument {
    title: String,
    #[serde(rename = "type")]
    entry_type: EntryType,
    #[serde(default)]
    required: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    multiple_lines: bool,
    #[serde(default)]
    value: Option<EntryValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title_when_on: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title_when_off: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{EntryDefinition, EntryDefinitionInput, EntryType, EntryValue};

    #[test]
    fn checkbox_defaults_to_unchecked() {
        let entry = EntryDefinition::new(
            "helpedCreate",
            "Were you a part of this video?",
            EntryType::Checkbox,
            EntryDefinitionInput::default(),
        )
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(entry.value(), &EntryValue::Checked(false));
    }

    #[test]
    fn multiple_lines_requires_text_type() {
        let result = EntryDefinition::new(
            "email",
            "Your email",
            EntryType::Email,
            EntryDefinitionInput {
                multiple_lines: true,
                ..EntryDefinitionInput::default()
            },
        );

        assert!(result.is_err());
    }

    #[test]
    fn on_off_titles_require_checkbox() {
        let result = EntryDefinition::new(
            "name",
            "Your name",
            EntryType::Text,
            EntryDefinitionInput {
                title_when_on: Some("Yes".to_owned()),
                ..EntryDefinitionInput::default()
            },
        );

        assert!(result.is_err());
    }

    #[test]
    fn default_value_must_match_type() {
        let result = EntryDefinition::new(
            "helpedCreate",
            "Helped?",
            EntryType::Checkbox,
            EntryDefinitionInput {
                value: Some(EntryValue::from("yes")),
                ..EntryDefinitionInput::default()
            },
        );

        assert!(result.is_err());
    }

    #[test]
    fn with_value_coerces_to_entry_type() {
        let checkbox = EntryDefinition::new(
            "agree",
            "Agree",
            EntryType::Checkbox,
            EntryDefinitionInput::default(),
        )
        .unwrap_or_else(|_| unreachable!());

        assert!(checkbox.with_value(EntryValue::from("on")).value().is_checked());
        assert!(!checkbox.with_value(EntryValue::from("")).value().is_checked());
    }

    #[test]
    fn entry_type_round_trips_through_storage_value() {
        for entry_type in [
            EntryType::Text,
            EntryType::Url,
            EntryType::Email,
            EntryType::Number,
            EntryType::Integer,
            EntryType::Checkbox,
        ] {
            assert_eq!(entry_type.as_str().parse::<EntryType>().ok(), Some(entry_type));
        }
    }
}
