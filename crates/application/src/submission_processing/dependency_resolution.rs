use std::collections::{BTreeMap, HashSet};

use formwork_core::NonEmptyString;
use formwork_domain::{ExternalContext, FormSchema, GroupDefinition, SubmittedValues};
use tracing::debug;

/// Entries to process for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveEntries {
    /// Entry ids in processing order, without duplicates.
    pub entry_ids: Vec<NonEmptyString>,
    /// Group id to fulfilled flag; `None` for unstructured forms.
    pub group_fulfillment: Option<BTreeMap<String, bool>>,
}

/// Decides which groups, and therefore which entries, are active.
///
/// An id is on when it is filled in the submitted values or, failing that,
/// in the external context. A group is fulfilled when it has no
/// dependency, when every `dependentOn` id is on, or when it declares
/// `alsoProcessIf` ids and all of those are on.
#[must_use]
pub fn resolve_active_entries(
    schema: &FormSchema,
    values: &SubmittedValues,
    context: &ExternalContext,
) -> ActiveEntries {
    let Some(groups) = schema.structure() else {
        return ActiveEntries {
            entry_ids: schema
                .entries()
                .iter()
                .map(|entry| entry.id().clone())
                .collect(),
            group_fulfillment: None,
        };
    };

    let mut entry_ids = Vec::new();
    let mut seen = HashSet::new();
    let mut group_fulfillment = BTreeMap::new();

    for group in groups {
        let fulfilled = group_is_fulfilled(group, values, context);
        group_fulfillment.insert(group.id().as_str().to_owned(), fulfilled);

        if !fulfilled {
            debug!(group_id = %group.id(), "skipping group with unmet dependencies");
            continue;
        }

        for entry_id in group.entries() {
            if seen.insert(entry_id.as_str()) {
                entry_ids.push(entry_id.clone());
            }
        }
    }

    ActiveEntries {
        entry_ids,
        group_fulfillment: Some(group_fulfillment),
    }
}

fn group_is_fulfilled(
    group: &GroupDefinition,
    values: &SubmittedValues,
    context: &ExternalContext,
) -> bool {
    if !group.has_dependency() {
        return true;
    }

    if all_on(group.dependent_on_ids(), values, context) {
        return true;
    }

    let overrides = group.also_process_if_ids();
    !overrides.is_empty() && all_on(overrides, values, context)
}

fn all_on(ids: &[NonEmptyString], values: &SubmittedValues, context: &ExternalContext) -> bool {
    ids.iter().all(|id| {
        values.filled(id.as_str()).is_some() || context.filled(id.as_str()).is_some()
    })
}
