use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::*;

pub fn consultation_note_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route(
            "/consultation-notes",
            post(create_consultation_note).get(list_consultation_notes),
        )
        .route(
            "/consultation-notes/patient/{patient_id}",
            get(list_patient_consultation_notes),
        )
        .route(
            "/consultation-notes/{id}",
            get(get_consultation_note)
                .patch(update_consultation_note)
                .delete(delete_consultation_note),
        )
        .with_state(config)
}
