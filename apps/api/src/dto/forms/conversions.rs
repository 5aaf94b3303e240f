use formwork_application::{
    EntryView, FormLayout, FormView, GroupView, ProblemView, ProcessedSubmission,
};
use formwork_domain::EntryValue;
use serde_json::Value;

use super::types::{
    EntryViewResponse, FormViewResponse, GroupViewResponse, ProblemResponse, SubmissionResponse,
};

fn entry_value_to_json(value: EntryValue) -> Value {
    match value {
        EntryValue::Checked(checked) => Value::Bool(checked),
        EntryValue::Text(text) => Value::String(text),
    }
}

impl From<ProblemView> for ProblemResponse {
    fn from(problem: ProblemView) -> Self {
        Self {
            code: problem.code.as_str().to_owned(),
            message: problem.message,
        }
    }
}

impl From<EntryView> for EntryViewResponse {
    fn from(entry: EntryView) -> Self {
        Self {
            id: entry.id,
            title: entry.title,
            entry_type: entry.entry_type.as_str().to_owned(),
            input_type: entry.input_type.to_owned(),
            control: entry.control.as_str().to_owned(),
            input_name: entry.input_name,
            value: entry_value_to_json(entry.value),
            required: entry.required,
            title_when_on: entry.title_when_on,
            title_when_off: entry.title_when_off,
            step: entry.step,
            problems: entry.problems.into_iter().map(ProblemResponse::from).collect(),
        }
    }
}

impl From<GroupView> for GroupViewResponse {
    fn from(group: GroupView) -> Self {
        Self {
            toggle_classes: group
                .dependent_on
                .iter()
                .map(|id| format!("dependentOn-{id}"))
                .collect(),
            id: group.id,
            fulfilled: group.fulfilled,
            dependent_on: group.dependent_on,
            dependencies_remaining_count: u32::try_from(group.dependencies_remaining_count)
                .unwrap_or(u32::MAX),
            dependencies_unfulfilled: group.dependencies_unfulfilled,
            entries: group.entries.into_iter().map(EntryViewResponse::from).collect(),
        }
    }
}

impl From<FormView> for FormViewResponse {
    fn from(view: FormView) -> Self {
        let (groups, entries) = match view.layout {
            FormLayout::Groups(groups) => (
                Some(groups.into_iter().map(GroupViewResponse::from).collect()),
                None,
            ),
            FormLayout::Entries(entries) => (
                None,
                Some(entries.into_iter().map(EntryViewResponse::from).collect()),
            ),
        };

        Self {
            base_id: view.base_id,
            is_being_submitted: view.is_being_submitted,
            entries_are_valid: view.entries_are_valid,
            groups,
            entries,
        }
    }
}

impl From<ProcessedSubmission> for SubmissionResponse {
    fn from(processed: ProcessedSubmission) -> Self {
        Self {
            is_being_submitted: processed.result.is_being_submitted(),
            entries_are_valid: processed.result.entries_are_valid(),
            form: FormViewResponse::from(processed.view),
            values: processed.accepted_values.map(|values| {
                values
                    .into_iter()
                    .map(|(key, value)| (key, entry_value_to_json(value)))
                    .collect()
            }),
        }
    }
}
