use std::collections::BTreeMap;

use formwork_core::{AppError, AppResult};
use formwork_domain::{EntryValue, SubmissionResult};

/// Optional mapping from entry id to the key used in copied values.
pub type RenameMap = BTreeMap<String, String>;

/// Copies the processed values of the given entries into a flat mapping.
///
/// Keys are entry ids unless `rename` maps an id to another key. Unknown
/// entry ids are reported as not found.
pub fn copy_values_for_entries<I, S>(
    result: &SubmissionResult,
    entry_ids: I,
    rename: Option<&RenameMap>,
) -> AppResult<BTreeMap<String, EntryValue>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut values = BTreeMap::new();

    for entry_id in entry_ids {
        let entry_id = entry_id.as_ref();
        let entry = result.entry(entry_id).ok_or_else(|| {
            AppError::NotFound(format!(
                "form '{}' has no entry '{entry_id}'",
                result.schema().base_id()
            ))
        })?;

        let key = rename
            .and_then(|rename| rename.get(entry_id))
            .map_or(entry_id, String::as_str);
        values.insert(key.to_owned(), entry.value().clone());
    }

    Ok(values)
}

/// Copies the processed values of every entry in a fulfilled group.
///
/// Returns `None` when the group was not fulfilled this submission,
/// including when the form was not submitted at all.
pub fn copy_values_for_group(
    result: &SubmissionResult,
    group_id: &str,
    rename: Option<&RenameMap>,
) -> AppResult<Option<BTreeMap<String, EntryValue>>> {
    let group = result.schema().group(group_id).ok_or_else(|| {
        AppError::NotFound(format!(
            "form '{}' has no group '{group_id}'",
            result.schema().base_id()
        ))
    })?;

    if result.is_group_fulfilled(group_id) != Some(true) {
        return Ok(None);
    }

    copy_values_for_entries(result, group.entries(), rename).map(Some)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use formwork_core::AppError;
    use formwork_domain::{EntryValue, ExternalContext, FormSchema, RawSubmission};
    use serde_json::json;

    use super::{copy_values_for_entries, copy_values_for_group};
    use crate::{SubmissionHooks, check_and_process};

    fn schema() -> FormSchema {
        serde_json::from_value(json!({
            "baseId": "signup",
            "entries": {
                "name": { "title": "Name", "type": "text" },
                "newsletter": { "title": "Newsletter", "type": "checkbox" },
                "topics": { "title": "Topics", "type": "text" }
            },
            "structure": [
                { "id": "person", "entries": ["name", "newsletter"] },
                { "id": "preferences", "dependentOn": "newsletter", "entries": ["topics"] }
            ]
        }))
        .unwrap_or_else(|_| unreachable!())
    }

    fn process(values: serde_json::Value) -> formwork_domain::SubmissionResult {
        check_and_process(
            &schema(),
            &RawSubmission::new().with_form("signup", values),
            &ExternalContext::new(),
            &SubmissionHooks::default(),
        )
        .unwrap_or_else(|_| unreachable!())
    }

    #[test]
    fn copies_entries_with_renamed_keys() {
        let result = process(json!({ "name": " Ada ", "newsletter": "on" }));
        let rename = BTreeMap::from([("name".to_owned(), "fullName".to_owned())]);

        let values = copy_values_for_entries(&result, ["name", "newsletter"], Some(&rename))
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            values,
            BTreeMap::from([
                ("fullName".to_owned(), EntryValue::from("Ada")),
                ("newsletter".to_owned(), EntryValue::Checked(true)),
            ])
        );
    }

    #[test]
    fn unknown_entry_is_not_found() {
        let result = process(json!({ "name": "Ada" }));

        let error = copy_values_for_entries(&result, ["missing"], None);

        assert!(matches!(error, Err(AppError::NotFound(_))));
    }

    #[test]
    fn fulfilled_group_values_are_copied() {
        let result = process(json!({ "newsletter": "on", "topics": "rust" }));

        let values = copy_values_for_group(&result, "preferences", None)
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            values,
            Some(BTreeMap::from([(
                "topics".to_owned(),
                EntryValue::from("rust")
            )]))
        );
    }

    #[test]
    fn unfulfilled_group_has_no_values() {
        let result = process(json!({ "topics": "rust" }));

        let values = copy_values_for_group(&result, "preferences", None)
            .unwrap_or_else(|_| unreachable!());

        assert_eq!(values, None);
    }

    #[test]
    fn unknown_group_is_not_found() {
        let result = process(json!({ "name": "Ada" }));

        assert!(matches!(
            copy_values_for_group(&result, "missing", None),
            Err(AppError::NotFound(_))
        ));
    }
}
