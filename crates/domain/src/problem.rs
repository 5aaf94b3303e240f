use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::EntryType;

/// Validation failure code attached to an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemCode {
    /// Required entry left empty.
    Empty,
    /// Value does not match the entry type's format.
    Invalid,
}

impl ProblemCode {
    /// Returns stable storage value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Invalid => "invalid",
        }
    }
}

impl Display for ProblemCode {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Set of problems found for one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProblemSet(BTreeSet<ProblemCode>);

impl ProblemSet {
    /// Creates an empty problem set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set holding one problem.
    #[must_use]
    pub fn single(code: ProblemCode) -> Self {
        Self(BTreeSet::from([code]))
    }

    /// Records a problem.
    pub fn insert(&mut self, code: ProblemCode) {
        self.0.insert(code);
    }

    /// Returns whether the problem was recorded.
    #[must_use]
    pub fn contains(&self, code: ProblemCode) -> bool {
        self.0.contains(&code)
    }

    /// Returns whether no problem was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates recorded problems in stable order.
    pub fn iter(&self) -> impl Iterator<Item = ProblemCode> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ProblemCode> for ProblemSet {
    fn from_iter<I: IntoIterator<Item = ProblemCode>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// User-facing messages for problem codes, optionally per entry type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemMessages {
    #[serde(default)]
    base: BTreeMap<ProblemCode, String>,
    #[serde(default)]
    types: BTreeMap<EntryType, BTreeMap<ProblemCode, String>>,
}

impl ProblemMessages {
    /// Creates an empty message table.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            base: BTreeMap::new(),
            types: BTreeMap::new(),
        }
    }

    /// Sets the fallback message for a problem code.
    #[must_use]
    pub fn with_base(mut self, code: ProblemCode, message: impl Into<String>) -> Self {
        self.base.insert(code, message.into());
        self
    }

    /// Sets the message for a problem code on one entry type.
    #[must_use]
    pub fn with_type(
        mut self,
        entry_type: EntryType,
        code: ProblemCode,
        message: impl Into<String>,
    ) -> Self {
        self.types
            .entry(entry_type)
            .or_default()
            .insert(code, message.into());
        self
    }

    /// Resolves the message for a problem, preferring the entry type table.
    #[must_use]
    pub fn message_for(&self, entry_type: EntryType, code: ProblemCode) -> Option<&str> {
        self.types
            .get(&entry_type)
            .and_then(|messages| messages.get(&code))
            .or_else(|| self.base.get(&code))
            .map(String::as_str)
    }
}

impl Default for ProblemMessages {
    fn default() -> Self {
        Self::empty()
            .with_base(ProblemCode::Empty, "Please enter")
            .with_type(
                EntryType::Email,
                ProblemCode::Invalid,
                "Please enter a valid email address",
            )
            .with_type(EntryType::Url, ProblemCode::Invalid, "Please enter a valid URL")
            .with_type(
                EntryType::Number,
                ProblemCode::Invalid,
                "Please enter a valid number",
            )
            .with_type(
                EntryType::Integer,
                ProblemCode::Invalid,
                "Please enter a valid integer (no decimal point)",
            )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ProblemCode, ProblemMessages, ProblemSet};
    use crate::EntryType;

    #[test]
    fn type_message_overrides_base_message() {
        let messages = ProblemMessages::default();

        assert_eq!(
            messages.message_for(EntryType::Email, ProblemCode::Invalid),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            messages.message_for(EntryType::Email, ProblemCode::Empty),
            Some("Please enter")
        );
        assert_eq!(
            messages.message_for(EntryType::Text, ProblemCode::Invalid),
            None
        );
    }

    #[test]
    fn message_table_decodes_from_schema_json() {
        let messages: ProblemMessages = serde_json::from_value(json!({
            "base": { "empty": "Required" },
            "types": { "url": { "invalid": "Bad link" } }
        }))
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            messages.message_for(EntryType::Url, ProblemCode::Invalid),
            Some("Bad link")
        );
        assert_eq!(
            messages.message_for(EntryType::Url, ProblemCode::Empty),
            Some("Required")
        );
    }

    #[test]
    fn problem_set_serializes_as_code_list() {
        let problems = ProblemSet::single(ProblemCode::Invalid);
        assert_eq!(
            serde_json::to_value(&problems).unwrap_or_default(),
            json!(["invalid"])
        );
    }
}
