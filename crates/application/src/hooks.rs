use formwork_core::{AppError, AppResult};
use formwork_domain::{EntryDefinition, EntryType, EntryValue, ExternalContext, ProblemSet};

use crate::entry_validation::{
    default_input_element_type, normalize_url_scheme, validate_entry_by_type,
};

/// Validates one extracted value, returning its problems.
pub type ValidateEntryFn = fn(&EntryDefinition, &EntryValue) -> ProblemSet;

/// Rewrites one extracted value before it is validated and stored.
pub type AdjustEntryValueFn = fn(&EntryDefinition, EntryValue) -> EntryValue;

/// Maps an entry type to the HTML input element type.
pub type InputElementTypeFn = fn(EntryType) -> &'static str;

/// Per-entry customisation points for submission processing.
///
/// `Default` installs [`validate_entry_by_type`] and
/// [`normalize_url_scheme`]. Setting `validate_entry` to `None` is a
/// configuration error; setting `adjust_entry_value` to `None` stores
/// values exactly as extracted.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionHooks {
    /// Entry validator.
    pub validate_entry: Option<ValidateEntryFn>,
    /// Value adjustment applied between extraction and validation.
    pub adjust_entry_value: Option<AdjustEntryValueFn>,
}

impl SubmissionHooks {
    /// Default hooks without any value adjustment.
    #[must_use]
    pub fn without_value_adjustment() -> Self {
        Self {
            adjust_entry_value: None,
            ..Self::default()
        }
    }

    pub(crate) fn resolve(&self) -> AppResult<ResolvedSubmissionHooks> {
        let validate_entry = self.validate_entry.ok_or_else(|| {
            AppError::Configuration(
                "a validate_entry hook must be set to process submissions".to_owned(),
            )
        })?;

        Ok(ResolvedSubmissionHooks {
            validate_entry,
            adjust_entry_value: self.adjust_entry_value.unwrap_or(keep_entry_value),
        })
    }
}

impl Default for SubmissionHooks {
    fn default() -> Self {
        Self {
            validate_entry: Some(validate_entry_by_type),
            adjust_entry_value: Some(normalize_url_scheme),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedSubmissionHooks {
    pub(crate) validate_entry: ValidateEntryFn,
    pub(crate) adjust_entry_value: AdjustEntryValueFn,
}

fn keep_entry_value(_entry: &EntryDefinition, value: EntryValue) -> EntryValue {
    value
}

/// Presentation customisation points.
#[derive(Debug, Clone, Copy)]
pub struct PresentationHooks {
    /// Input element type mapping; required.
    pub input_element_type: Option<InputElementTypeFn>,
}

impl PresentationHooks {
    pub(crate) fn resolve_input_element_type(&self) -> AppResult<InputElementTypeFn> {
        self.input_element_type.ok_or_else(|| {
            AppError::Configuration(
                "an input_element_type hook must be set to present forms".to_owned(),
            )
        })
    }
}

impl Default for PresentationHooks {
    fn default() -> Self {
        Self {
            input_element_type: Some(default_input_element_type),
        }
    }
}

/// Data source for the host's external values.
///
/// Consulted once per submitted call, never for forms that are not being
/// submitted.
pub trait ExternalValuesSource {
    /// Produces the external context for the current request.
    fn external_values(&self) -> AppResult<ExternalContext>;
}

impl ExternalValuesSource for ExternalContext {
    fn external_values(&self) -> AppResult<ExternalContext> {
        Ok(self.clone())
    }
}

/// Source providing no external values.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoExternalValues;

impl ExternalValuesSource for NoExternalValues {
    fn external_values(&self) -> AppResult<ExternalContext> {
        Ok(ExternalContext::new())
    }
}

/// Source backed by a closure.
#[derive(Debug, Clone, Copy)]
pub struct ExternalValuesFn<F>(pub F);

impl<F> ExternalValuesSource for ExternalValuesFn<F>
where
    F: Fn() -> AppResult<ExternalContext>,
{
    fn external_values(&self) -> AppResult<ExternalContext> {
        (self.0)()
    }
}
