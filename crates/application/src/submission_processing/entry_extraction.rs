use formwork_domain::{EntryDefinition, EntryValue, SubmittedValues};
use serde_json::Value;
use tracing::warn;

/// Reads one entry's value out of the working submitted values.
///
/// Checkboxes are on whenever their key is present with a non-null value.
/// Other entries take the trimmed text, or the empty string when missing.
pub(super) fn extract_entry_value(entry: &EntryDefinition, values: &SubmittedValues) -> EntryValue {
    let submitted = values.get(entry.id().as_str());

    if entry.entry_type().is_checkbox() {
        return EntryValue::Checked(submitted.is_some_and(|value| !value.is_null()));
    }

    let text = match submitted {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::Bool(true)) => "1".to_owned(),
        Some(Value::String(text)) => text.trim().to_owned(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Array(_) | Value::Object(_)) => {
            warn!(
                entry_id = %entry.id(),
                "submitted value is not a scalar; treating it as empty"
            );
            String::new()
        }
    };

    EntryValue::Text(text)
}
