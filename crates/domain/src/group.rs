use formwork_core::{AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::serde_support::one_or_many;

/// A section of entries, optionally conditional on other values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDefinition {
    id: NonEmptyString,
    entries: Vec<NonEmptyString>,
    #[serde(
        default,
        deserialize_with = "one_or_many::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    dependent_on: Vec<NonEmptyString>,
    #[serde(
        default,
        deserialize_with = "one_or_many::deserialize",
        skip_serializing_if = "Vec::is_empty"
    )]
    also_process_if: Vec<NonEmptyString>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    hidden: bool,
}

impl GroupDefinition {
    /// Creates an unconditional, visible group.
    pub fn new<I, S>(id: impl Into<String>, entries: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self {
            id: NonEmptyString::new(id)?,
            entries: collect_identifiers(entries)?,
            dependent_on: Vec::new(),
            also_process_if: Vec::new(),
            hidden: false,
        })
    }

    /// Makes the group depend on every listed id being on.
    pub fn dependent_on<I, S>(mut self, ids: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependent_on = collect_identifiers(ids)?;
        Ok(self)
    }

    /// Processes the group anyway when every listed id is on.
    pub fn also_process_if<I, S>(mut self, ids: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.also_process_if = collect_identifiers(ids)?;
        Ok(self)
    }

    /// Hides the group from presentation without affecting processing.
    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Returns group identifier.
    #[must_use]
    pub fn id(&self) -> &NonEmptyString {
        &self.id
    }

    /// Returns entry ids in display order.
    #[must_use]
    pub fn entries(&self) -> &[NonEmptyString] {
        &self.entries
    }

    /// Returns ids that must all be on for the group to be active.
    #[must_use]
    pub fn dependent_on_ids(&self) -> &[NonEmptyString] {
        &self.dependent_on
    }

    /// Returns the override ids that keep the group processed.
    #[must_use]
    pub fn also_process_if_ids(&self) -> &[NonEmptyString] {
        &self.also_process_if
    }

    /// Returns whether the group has a dependency expression.
    #[must_use]
    pub fn has_dependency(&self) -> bool {
        !self.dependent_on.is_empty()
    }

    /// Returns the presentation-only hidden flag.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

fn collect_identifiers<I, S>(ids: I) -> AppResult<Vec<NonEmptyString>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ids.into_iter().map(NonEmptyString::new).collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::GroupDefinition;

    #[test]
    fn dependency_accepts_single_identifier() {
        let group: GroupDefinition = serde_json::from_value(json!({
            "id": "aboutSubmitter",
            "dependentOn": "loggedOut",
            "alsoProcessIf": ["loggedIn"],
            "entries": ["name", "email"]
        }))
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(group.dependent_on_ids().len(), 1);
        assert_eq!(group.dependent_on_ids()[0].as_str(), "loggedOut");
        assert_eq!(group.also_process_if_ids()[0].as_str(), "loggedIn");
        assert!(!group.is_hidden());
    }

    #[test]
    fn empty_dependency_list_means_no_dependency() {
        let group: GroupDefinition = serde_json::from_value(json!({
            "id": "always",
            "dependentOn": [],
            "entries": ["name"]
        }))
        .unwrap_or_else(|_| unreachable!());

        assert!(!group.has_dependency());
    }

    #[test]
    fn blank_dependency_identifier_is_rejected() {
        let result = GroupDefinition::new("connection", ["role"])
            .and_then(|group| group.dependent_on(["  "]));

        assert!(result.is_err());
    }
}
