use std::sync::Arc;

use axum::{routing::get, Router};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use consultation_note_cell::router::consultation_note_routes;
use patient_cell::router::patient_routes;
use shared_config::AppConfig;

use crate::docs::ApiDoc;

/// Interactive API documentation.
pub const SWAGGER_UI_PATH: &str = "/api";
/// Path the generated OpenAPI document is served from.
pub const OPENAPI_PATH: &str = "/api-json";

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Patient Records API is running!" }))
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_PATH, ApiDoc::openapi()))
        .merge(patient_routes(state.clone()))
        .merge(consultation_note_routes(state))
}
