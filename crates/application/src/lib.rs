//! Form processing services and ports.

#![forbid(unsafe_code)]

mod entry_validation;
mod form_ports;
mod form_service;
mod hooks;
mod presentation;
mod selectors;
mod submission_processing;

pub use entry_validation::{
    default_input_element_type, is_valid_email, is_valid_integer, is_valid_number, is_valid_url,
    normalize_url_scheme, validate_entry_by_type,
};
pub use form_ports::FormSchemaCatalog;
pub use form_service::{FormService, ProcessedSubmission};
pub use hooks::{
    AdjustEntryValueFn, ExternalValuesFn, ExternalValuesSource, InputElementTypeFn,
    NoExternalValues, PresentationHooks, SubmissionHooks, ValidateEntryFn,
};
pub use presentation::{
    ControlKind, EntryView, FormLayout, FormView, GroupView, ProblemView, present_form,
};
pub use selectors::{RenameMap, copy_values_for_entries, copy_values_for_group};
pub use submission_processing::{ActiveEntries, check_and_process, resolve_active_entries};
