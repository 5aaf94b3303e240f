use axum::Json;
use axum::extract::{Form, Path, State};
use formwork_domain::RawSubmission;
use serde_json::Value;

use crate::dto::{FormListResponse, FormViewResponse, SubmissionResponse};
use crate::error::ApiResult;
use crate::state::AppState;

#[cfg(test)]
mod tests;

pub async fn list_forms_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<FormListResponse>> {
    let base_ids = state.form_service.list_forms().await?;

    Ok(Json(FormListResponse { base_ids }))
}

pub async fn form_view_handler(
    State(state): State<AppState>,
    Path(base_id): Path<String>,
) -> ApiResult<Json<FormViewResponse>> {
    let view = state
        .form_service
        .fresh_form(base_id.as_str(), &state.external_values)
        .await?;

    Ok(Json(FormViewResponse::from(view)))
}

/// Accepts url-encoded `baseId[entryId]` fields, as posted by form markup.
pub async fn submit_form_handler(
    State(state): State<AppState>,
    Path(base_id): Path<String>,
    Form(fields): Form<Vec<(String, String)>>,
) -> ApiResult<Json<SubmissionResponse>> {
    let submission = RawSubmission::from_form_pairs(fields);

    submit(&state, base_id.as_str(), &submission).await
}

pub async fn submit_form_json_handler(
    State(state): State<AppState>,
    Path(base_id): Path<String>,
    Json(payload): Json<Value>,
) -> ApiResult<Json<SubmissionResponse>> {
    let submission = RawSubmission::from_value(payload)?;

    submit(&state, base_id.as_str(), &submission).await
}

async fn submit(
    state: &AppState,
    base_id: &str,
    submission: &RawSubmission,
) -> ApiResult<Json<SubmissionResponse>> {
    let processed = state
        .form_service
        .submit(base_id, submission, &state.external_values)
        .await?;

    Ok(Json(SubmissionResponse::from(processed)))
}
