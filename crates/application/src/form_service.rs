use std::collections::BTreeMap;
use std::sync::Arc;

use formwork_core::{AppError, AppResult};
use formwork_domain::{EntryValue, FormSchema, RawSubmission, SubmissionResult};

use crate::form_ports::FormSchemaCatalog;
use crate::hooks::{ExternalValuesSource, PresentationHooks, SubmissionHooks};
use crate::presentation::{FormView, present_form};
use crate::selectors::copy_values_for_entries;
use crate::submission_processing::check_and_process;


/// Outcome of one submission handled by [`FormService`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedSubmission {
    /// Processing result.
    pub result: SubmissionResult,
    /// View model for re-rendering the form.
    pub view: FormView,
    /// Processed values of every processed entry, present only when the
    /// submission was accepted.
    pub accepted_values: Option<BTreeMap<String, EntryValue>>,
}

/// Application service serving forms from a schema catalog.
#[derive(Clone)]
pub struct FormService {
    catalog: Arc<dyn FormSchemaCatalog>,
    submission_hooks: SubmissionHooks,
    presentation_hooks: PresentationHooks,
}

impl FormService {
    /// Creates a new form service.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn FormSchemaCatalog>,
        submission_hooks: SubmissionHooks,
        presentation_hooks: PresentationHooks,
    ) -> Self {
        Self {
            catalog,
            submission_hooks,
            presentation_hooks,
        }
    }

    /// Lists the base ids of every served form.
    pub async fn list_forms(&self) -> AppResult<Vec<String>> {
        self.catalog.list_base_ids().await
    }

    /// Returns the view model of a form that has not been submitted.
    pub async fn fresh_form<S>(&self, base_id: &str, external_values: &S) -> AppResult<FormView>
    where
        S: ExternalValuesSource + ?Sized,
    {
        let schema = self.require_schema(base_id).await?;
        let context = external_values.external_values()?;

        present_form(
            &SubmissionResult::not_submitted(&schema),
            &context,
            &self.presentation_hooks,
        )
    }

    /// Processes a submission and builds the view model for the result.
    ///
    /// External values are requested once and shared between processing
    /// and presentation.
    pub async fn submit<S>(
        &self,
        base_id: &str,
        submission: &RawSubmission,
        external_values: &S,
    ) -> AppResult<ProcessedSubmission>
    where
        S: ExternalValuesSource + ?Sized,
    {
        let schema = self.require_schema(base_id).await?;
        let context = external_values.external_values()?;

        let result = check_and_process(&schema, submission, &context, &self.submission_hooks)?;
        let view = present_form(&result, &context, &self.presentation_hooks)?;
        let accepted_values = if result.is_accepted() {
            Some(copy_values_for_entries(
                &result,
                result.processed_entry_ids(),
                None,
            )?)
        } else {
            None
        };

        Ok(ProcessedSubmission {
            result,
            view,
            accepted_values,
        })
    }

    async fn require_schema(&self, base_id: &str) -> AppResult<Arc<FormSchema>> {
        self.catalog
            .find_schema(base_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("form '{base_id}' does not exist")))
    }
}
