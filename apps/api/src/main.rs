//! Formwork API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use formwork_application::{FormService, PresentationHooks, SubmissionHooks};
use formwork_core::AppError;
use formwork_infrastructure::InMemoryFormSchemaCatalog;
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let catalog = InMemoryFormSchemaCatalog::load_from_dir(&config.form_schema_dir).await?;
    let form_service = FormService::new(
        Arc::new(catalog),
        SubmissionHooks::default(),
        PresentationHooks::default(),
    );

    let app_state = AppState {
        form_service,
        external_values: config.external_values.clone(),
    };
    let app = api_router::build_router(app_state, &config.frontend_url)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "formwork-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
