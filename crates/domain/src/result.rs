use std::collections::BTreeMap;

use formwork_core::NonEmptyString;
use serde::Serialize;

use crate::entry::EntryDefinition;
use crate::problem::ProblemSet;
use crate::schema::FormSchema;

/// Outcome of checking one form for a submission.
///
/// Built once per call and never mutated afterwards. The embedded schema
/// carries the processed values, so it can be rendered or processed again
/// as a form with values already set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    schema: FormSchema,
    is_being_submitted: bool,
    entries_are_valid: bool,
    processed_entry_ids: Vec<NonEmptyString>,
    problems: BTreeMap<String, ProblemSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_fulfillment: Option<BTreeMap<String, bool>>,
}

impl SubmissionResult {
    /// Result for a form that has no submitted payload.
    #[must_use]
    pub fn not_submitted(schema: &FormSchema) -> Self {
        Self {
            schema: schema.clone(),
            is_being_submitted: false,
            entries_are_valid: true,
            processed_entry_ids: Vec::new(),
            problems: BTreeMap::new(),
            group_fulfillment: None,
        }
    }

    /// Result for a processed submission.
    ///
    /// Empty problem sets are dropped; `entries_are_valid` holds exactly
    /// when no processed entry kept a problem.
    #[must_use]
    pub fn submitted(
        schema: FormSchema,
        processed_entry_ids: Vec<NonEmptyString>,
        problems: BTreeMap<String, ProblemSet>,
        group_fulfillment: Option<BTreeMap<String, bool>>,
    ) -> Self {
        let problems: BTreeMap<String, ProblemSet> = problems
            .into_iter()
            .filter(|(_, entry_problems)| !entry_problems.is_empty())
            .collect();

        Self {
            schema,
            is_being_submitted: true,
            entries_are_valid: problems.is_empty(),
            processed_entry_ids,
            problems,
            group_fulfillment,
        }
    }

    /// Returns the schema holding current entry values.
    #[must_use]
    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Consumes the result, keeping the schema with current values.
    #[must_use]
    pub fn into_schema(self) -> FormSchema {
        self.schema
    }

    /// Returns whether a payload was present for the form.
    #[must_use]
    pub fn is_being_submitted(&self) -> bool {
        self.is_being_submitted
    }

    /// Returns whether no processed entry has a problem.
    #[must_use]
    pub fn entries_are_valid(&self) -> bool {
        self.entries_are_valid
    }

    /// Returns whether the form was submitted and passed validation.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        self.is_being_submitted && self.entries_are_valid
    }

    /// Returns ids processed this submission, in processing order.
    #[must_use]
    pub fn processed_entry_ids(&self) -> &[NonEmptyString] {
        &self.processed_entry_ids
    }

    /// Returns whether an entry was processed this submission.
    #[must_use]
    pub fn was_processed(&self, entry_id: &str) -> bool {
        self.processed_entry_ids
            .iter()
            .any(|processed| processed.as_str() == entry_id)
    }

    /// Returns an entry with its current value.
    #[must_use]
    pub fn entry(&self, entry_id: &str) -> Option<&EntryDefinition> {
        self.schema.entry(entry_id)
    }

    /// Returns non-empty problem sets keyed by entry id.
    #[must_use]
    pub fn problems(&self) -> &BTreeMap<String, ProblemSet> {
        &self.problems
    }

    /// Returns the problems of one entry, if it has any.
    #[must_use]
    pub fn problems_for(&self, entry_id: &str) -> Option<&ProblemSet> {
        self.problems.get(entry_id)
    }

    /// Returns group fulfillment when the form is structured and submitted.
    #[must_use]
    pub fn group_fulfillment(&self) -> Option<&BTreeMap<String, bool>> {
        self.group_fulfillment.as_ref()
    }

    /// Returns whether a group was fulfilled this submission.
    #[must_use]
    pub fn is_group_fulfilled(&self, group_id: &str) -> Option<bool> {
        self.group_fulfillment.as_ref()?.get(group_id).copied()
    }
}
