use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::*;

pub fn patient_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/patients", post(create_patient).get(list_patients))
        .route(
            "/patients/{id}",
            get(get_patient).patch(update_patient).delete(delete_patient),
        )
        .with_state(config)
}
