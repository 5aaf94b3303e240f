use formwork_domain::{AutoFillTarget, ExternalContext, FormSchema, SubmittedValues};
use serde_json::Value;
use tracing::{debug, warn};

/// Copies auto-fill source values into the working submitted values.
///
/// The external context wins over submitted values for the source. Rules
/// whose source is absent or empty leave the targets untouched; a missing
/// sub-key fills its target with the empty string.
pub(super) fn apply_auto_fill(
    schema: &FormSchema,
    values: &mut SubmittedValues,
    context: &ExternalContext,
) {
    for rule in schema.auto_fill() {
        let source_id = rule.source_id().as_str();
        let Some(source_value) = context
            .filled(source_id)
            .or_else(|| values.filled(source_id))
            .cloned()
        else {
            debug!(source_id, "auto-fill source is empty");
            continue;
        };

        match rule.target() {
            AutoFillTarget::Entry(entry_id) => {
                values.insert(entry_id.as_str(), source_value);
            }
            AutoFillTarget::Fields(fields) => {
                for (sub_key, entry_id) in fields {
                    let field_value = match source_value.get(sub_key.as_str()) {
                        Some(field_value) => field_value.clone(),
                        None => {
                            warn!(
                                source_id,
                                sub_key = sub_key.as_str(),
                                entry_id = entry_id.as_str(),
                                "auto-fill source lacks sub-key; filling empty value"
                            );
                            Value::String(String::new())
                        }
                    };
                    values.insert(entry_id.as_str(), field_value);
                }
            }
        }
    }
}
