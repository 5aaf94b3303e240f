use std::collections::{BTreeMap, HashSet};

use formwork_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::auto_fill::{AutoFillRule, AutoFillTarget};
use crate::entry::{EntryDefinition, EntryDocument, EntryValue};
use crate::group::GroupDefinition;
use crate::problem::ProblemMessages;
use crate::serde_support::ordered_map;

/// Input payload for constructing one form schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSchemaInput {
    /// Entries in natural order.
    pub entries: Vec<EntryDefinition>,
    /// Optional group structure; empty means unstructured.
    pub structure: Option<Vec<GroupDefinition>>,
    /// Auto-fill rules in evaluation order.
    pub auto_fill: Vec<AutoFillRule>,
    /// Optional replacement for the default problem messages.
    pub problem_messages: Option<ProblemMessages>,
}

/// Immutable, validated form schema shared across submissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "FormSchemaDocument", into = "FormSchemaDocument")]
pub struct FormSchema {
    base_id: NonEmptyString,
    entries: Vec<EntryDefinition>,
    structure: Option<Vec<GroupDefinition>>,
    auto_fill: Vec<AutoFillRule>,
    problem_messages: Option<ProblemMessages>,
}

impl FormSchema {
    /// Creates a validated form schema.
    pub fn new(base_id: impl Into<String>, input: FormSchemaInput) -> AppResult<Self> {
        let FormSchemaInput {
            entries,
            structure,
            auto_fill,
            problem_messages,
        } = input;

        let base_id = NonEmptyString::new(base_id)?;

        let mut entry_ids = HashSet::new();
        for entry in &entries {
            if !entry_ids.insert(entry.id().as_str()) {
                return Err(AppError::Validation(format!(
                    "duplicate entry '{}' in form '{}'",
                    entry.id(),
                    base_id
                )));
            }
        }

        let structure = structure.filter(|groups| !groups.is_empty());
        if let Some(groups) = &structure {
            let mut group_ids = HashSet::new();
            for group in groups {
                if !group_ids.insert(group.id().as_str()) {
                    return Err(AppError::Validation(format!(
                        "duplicate group '{}' in form '{}'",
                        group.id(),
                        base_id
                    )));
                }

                for entry_id in group.entries() {
                    if !entry_ids.contains(entry_id.as_str()) {
                        return Err(AppError::Validation(format!(
                            "group '{}' references unknown entry '{}'",
                            group.id(),
                            entry_id
                        )));
                    }
                }
            }
        }

        for rule in &auto_fill {
            for entry_id in rule.target().target_entry_ids() {
                if !entry_ids.contains(entry_id.as_str()) {
                    return Err(AppError::Validation(format!(
                        "auto-fill source '{}' targets unknown entry '{}'",
                        rule.source_id(),
                        entry_id
                    )));
                }
            }
        }

        Ok(Self {
            base_id,
            entries,
            structure,
            auto_fill,
            problem_messages,
        })
    }

    /// Returns the base id used as the submission's top-level key.
    #[must_use]
    pub fn base_id(&self) -> &NonEmptyString {
        &self.base_id
    }

    /// Returns entries in natural order.
    #[must_use]
    pub fn entries(&self) -> &[EntryDefinition] {
        &self.entries
    }

    /// Returns one entry by id.
    #[must_use]
    pub fn entry(&self, entry_id: &str) -> Option<&EntryDefinition> {
        self.entries
            .iter()
            .find(|entry| entry.id().as_str() == entry_id)
    }

    /// Returns the group structure, if the form is structured.
    #[must_use]
    pub fn structure(&self) -> Option<&[GroupDefinition]> {
        self.structure.as_deref()
    }

    /// Returns one group by id.
    #[must_use]
    pub fn group(&self, group_id: &str) -> Option<&GroupDefinition> {
        self.structure()?
            .iter()
            .find(|group| group.id().as_str() == group_id)
    }

    /// Returns auto-fill rules in evaluation order.
    #[must_use]
    pub fn auto_fill(&self) -> &[AutoFillRule] {
        &self.auto_fill
    }

    /// Returns the schema's own problem messages, if any.
    #[must_use]
    pub fn problem_messages(&self) -> Option<&ProblemMessages> {
        self.problem_messages.as_ref()
    }

    /// Returns a copy whose entries carry the given current values.
    ///
    /// Entries missing from `values` keep their existing value.
    #[must_use]
    pub fn with_entry_values(&self, values: &BTreeMap<String, EntryValue>) -> Self {
        let entries = self
            .entries
            .iter()
            .map(|entry| match values.get(entry.id().as_str()) {
                Some(value) => entry.with_value(value.clone()),
                None => entry.clone(),
            })
            .collect();

        Self {
            entries,
            ..self.clone()
        }
    }
}

/// JSON document shape of a form schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FormSchemaDocument {
    #[serde(alias = "baseID")]
    base_id: String,
    #[serde(with = "ordered_map")]
    entries: Vec<(String, EntryDocument)>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    structure: Option<Vec<GroupDefinition>>,
    #[serde(default, with = "ordered_map", skip_serializing_if = "Vec::is_empty")]
    automatically_fill_entries_from: Vec<(String, AutoFillTarget)>,
    #[serde(
        default,
        rename = "problemIdsToMessages",
        alias = "problemIDsToMessages",
        skip_serializing_if = "Option::is_none"
    )]
    problem_messages: Option<ProblemMessages>,
}

impl TryFrom<FormSchemaDocument> for FormSchema {
    type Error = AppError;

    fn try_from(document: FormSchemaDocument) -> Result<Self, Self::Error> {
        let entries = document
            .entries
            .into_iter()
            .map(|(entry_id, entry)| EntryDefinition::from_document(entry_id, entry))
            .collect::<AppResult<Vec<_>>>()?;

        let auto_fill = document
            .automatically_fill_entries_from
            .into_iter()
            .map(|(source_id, target)| AutoFillRule::from_parts(source_id, target))
            .collect::<AppResult<Vec<_>>>()?;

        Self::new(
            document.base_id,
            FormSchemaInput {
                entries,
                structure: document.structure,
                auto_fill,
                problem_messages: document.problem_messages,
            },
        )
    }
}

impl From<FormSchema> for FormSchemaDocument {
    fn from(schema: FormSchema) -> Self {
        Self {
            base_id: schema.base_id.as_str().to_owned(),
            entries: schema
                .entries
                .iter()
                .map(|entry| (entry.id().as_str().to_owned(), entry.to_document()))
                .collect(),
            structure: schema.structure,
            automatically_fill_entries_from: schema
                .auto_fill
                .into_iter()
                .map(|rule| (rule.source_id().as_str().to_owned(), rule.target().clone()))
                .collect(),
            problem_messages: schema.problem_messages,
        }
    }
}
