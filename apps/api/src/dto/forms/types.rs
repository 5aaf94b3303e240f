use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

/// Base ids of every served form.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/form-list-response.ts"
)]
pub struct FormListResponse {
    pub base_ids: Vec<String>,
}

/// One validation problem with its message.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/problem-response.ts"
)]
pub struct ProblemResponse {
    pub code: String,
    pub message: Option<String>,
}

/// Render-ready form entry.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/entry-view-response.ts"
)]
pub struct EntryViewResponse {
    pub id: String,
    pub title: String,
    pub entry_type: String,
    pub input_type: String,
    pub control: String,
    pub input_name: String,
    #[ts(type = "string | boolean")]
    pub value: Value,
    pub required: bool,
    pub title_when_on: Option<String>,
    pub title_when_off: Option<String>,
    pub step: Option<u32>,
    pub problems: Vec<ProblemResponse>,
}

/// Render-ready form group.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/group-view-response.ts"
)]
pub struct GroupViewResponse {
    pub id: String,
    pub fulfilled: bool,
    pub dependent_on: Vec<String>,
    /// Client-side toggle classes, one `dependentOn-<id>` per dependency.
    pub toggle_classes: Vec<String>,
    pub dependencies_remaining_count: u32,
    pub dependencies_unfulfilled: bool,
    pub entries: Vec<EntryViewResponse>,
}

/// Render-ready form. Exactly one of `groups` and `entries` is set.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/form-view-response.ts"
)]
pub struct FormViewResponse {
    pub base_id: String,
    pub is_being_submitted: bool,
    pub entries_are_valid: bool,
    pub groups: Option<Vec<GroupViewResponse>>,
    pub entries: Option<Vec<EntryViewResponse>>,
}

/// Outcome of a form submission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/submission-response.ts"
)]
pub struct SubmissionResponse {
    pub is_being_submitted: bool,
    pub entries_are_valid: bool,
    pub form: FormViewResponse,
    /// Processed values, present only for accepted submissions.
    #[ts(type = "Record<string, string | boolean> | null")]
    pub values: Option<BTreeMap<String, Value>>,
}
