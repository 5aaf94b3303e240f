mod cors;

use axum::Router;
use axum::routing::{get, post};
use formwork_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let cors_layer = cors::build_cors_layer(frontend_url)?;

    let form_routes = Router::new()
        .route("/api/forms", get(handlers::forms::list_forms_handler))
        .route(
            "/api/forms/{base_id}",
            get(handlers::forms::form_view_handler),
        )
        .route(
            "/api/forms/{base_id}/submissions",
            post(handlers::forms::submit_form_handler),
        )
        .route(
            "/api/forms/{base_id}/submissions/json",
            post(handlers::forms::submit_form_json_handler),
        );

    Ok(Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(form_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state))
}
