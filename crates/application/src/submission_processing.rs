use std::collections::BTreeMap;

use formwork_core::AppResult;
use formwork_domain::{FormSchema, ProblemSet, RawSubmission, SubmissionResult};
use tracing::info;

use crate::hooks::{ExternalValuesSource, SubmissionHooks};

mod auto_fill;
mod dependency_resolution;
mod entry_extraction;


pub use dependency_resolution::{ActiveEntries, resolve_active_entries};

/// Checks whether `submission` carries values for `schema` and, if so,
/// processes them.
///
/// Processing resolves active groups, applies auto-fill to a working copy
/// of the submitted values, then extracts, adjusts and validates every
/// active entry. The caller's submission is never modified.
///
/// Hooks are resolved first, so a missing validator fails every call.
pub fn check_and_process<S>(
    schema: &FormSchema,
    submission: &RawSubmission,
    external_values: &S,
    hooks: &SubmissionHooks,
) -> AppResult<SubmissionResult>
where
    S: ExternalValuesSource + ?Sized,
{
    let hooks = hooks.resolve()?;
    let base_id = schema.base_id().as_str();

    let Some(mut values) = submission.values_for(base_id)? else {
        return Ok(SubmissionResult::not_submitted(schema));
    };

    let context = external_values.external_values()?;
    let active = resolve_active_entries(schema, &values, &context);
    auto_fill::apply_auto_fill(schema, &mut values, &context);

    let mut processed_values = BTreeMap::new();
    let mut problems: BTreeMap<String, ProblemSet> = BTreeMap::new();

    for entry_id in &active.entry_ids {
        let Some(entry) = schema.entry(entry_id.as_str()) else {
            continue;
        };

        let extracted = entry_extraction::extract_entry_value(entry, &values);
        let value = (hooks.adjust_entry_value)(entry, extracted);
        let entry_problems = (hooks.validate_entry)(entry, &value);

        if !entry_problems.is_empty() {
            problems.insert(entry_id.as_str().to_owned(), entry_problems);
        }
        processed_values.insert(entry_id.as_str().to_owned(), value);
    }

    let result = SubmissionResult::submitted(
        schema.with_entry_values(&processed_values),
        active.entry_ids,
        problems,
        active.group_fulfillment,
    );

    info!(
        base_id,
        processed_entries = result.processed_entry_ids().len(),
        entries_are_valid = result.entries_are_valid(),
        "processed form submission"
    );

    Ok(result)
}
