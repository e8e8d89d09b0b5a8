use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use shared_config::AppConfig;
use shared_models::{error::AppError, ConsultationNote, ConsultationNoteWithPatient};
use shared_utils::extractor::{ApiPath, ApiQuery, ValidatedJson};

use crate::models::{
    ConsultationNoteListQuery, CreateConsultationNoteRequest, UpdateConsultationNoteRequest,
};
use crate::services::ConsultationNoteService;

/// Create a consultation note for an existing patient.
#[utoipa::path(
    post,
    path = "/consultation-notes",
    tag = "consultation-notes",
    request_body = CreateConsultationNoteRequest,
    responses(
        (status = 201, description = "Consultation note successfully created", body = ConsultationNoteWithPatient),
        (status = 400, description = "Invalid input data"),
        (status = 404, description = "Patient not found")
    )
)]
#[axum::debug_handler]
pub async fn create_consultation_note(
    State(config): State<Arc<AppConfig>>,
    ValidatedJson(request): ValidatedJson<CreateConsultationNoteRequest>,
) -> Result<(StatusCode, Json<ConsultationNoteWithPatient>), AppError> {
    let service = ConsultationNoteService::new(&config);

    let note = service.create(request).await?;

    Ok((StatusCode::CREATED, Json(note)))
}

/// List consultation notes newest first, optionally for one patient.
#[utoipa::path(
    get,
    path = "/consultation-notes",
    tag = "consultation-notes",
    params(ConsultationNoteListQuery),
    responses(
        (status = 200, description = "List of consultation notes retrieved successfully", body = [ConsultationNoteWithPatient])
    )
)]
#[axum::debug_handler]
pub async fn list_consultation_notes(
    State(config): State<Arc<AppConfig>>,
    ApiQuery(query): ApiQuery<ConsultationNoteListQuery>,
) -> Result<Json<Vec<ConsultationNoteWithPatient>>, AppError> {
    let service = ConsultationNoteService::new(&config);

    let notes = service.find_all(query.patient_id.as_deref()).await?;

    Ok(Json(notes))
}

/// List the consultation notes of a patient that must exist.
#[utoipa::path(
    get,
    path = "/consultation-notes/patient/{patient_id}",
    tag = "consultation-notes",
    params(("patient_id" = String, Path, description = "UUID of the patient")),
    responses(
        (status = 200, description = "Patient consultation notes retrieved successfully", body = [ConsultationNote]),
        (status = 404, description = "Patient not found")
    )
)]
#[axum::debug_handler]
pub async fn list_patient_consultation_notes(
    State(config): State<Arc<AppConfig>>,
    ApiPath(patient_id): ApiPath<String>,
) -> Result<Json<Vec<ConsultationNote>>, AppError> {
    let service = ConsultationNoteService::new(&config);

    let notes = service.find_by_patient(&patient_id).await?;

    Ok(Json(notes))
}

#[utoipa::path(
    get,
    path = "/consultation-notes/{id}",
    tag = "consultation-notes",
    params(("id" = String, Path, description = "UUID of the consultation note")),
    responses(
        (status = 200, description = "Consultation note found and returned successfully", body = ConsultationNoteWithPatient),
        (status = 404, description = "Consultation note not found")
    )
)]
#[axum::debug_handler]
pub async fn get_consultation_note(
    State(config): State<Arc<AppConfig>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<ConsultationNoteWithPatient>, AppError> {
    let service = ConsultationNoteService::new(&config);

    let note = service.find_one(&id).await?;

    Ok(Json(note))
}

#[utoipa::path(
    patch,
    path = "/consultation-notes/{id}",
    tag = "consultation-notes",
    params(("id" = String, Path, description = "UUID of the consultation note to update")),
    request_body = UpdateConsultationNoteRequest,
    responses(
        (status = 200, description = "Consultation note updated successfully", body = ConsultationNoteWithPatient),
        (status = 400, description = "Invalid input data"),
        (status = 404, description = "Consultation note not found")
    )
)]
#[axum::debug_handler]
pub async fn update_consultation_note(
    State(config): State<Arc<AppConfig>>,
    ApiPath(id): ApiPath<String>,
    ValidatedJson(request): ValidatedJson<UpdateConsultationNoteRequest>,
) -> Result<Json<ConsultationNoteWithPatient>, AppError> {
    let service = ConsultationNoteService::new(&config);

    let note = service.update(&id, request).await?;

    Ok(Json(note))
}

#[utoipa::path(
    delete,
    path = "/consultation-notes/{id}",
    tag = "consultation-notes",
    params(("id" = String, Path, description = "UUID of the consultation note to delete")),
    responses(
        (status = 200, description = "Consultation note deleted successfully", body = ConsultationNote),
        (status = 404, description = "Consultation note not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_consultation_note(
    State(config): State<Arc<AppConfig>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<ConsultationNote>, AppError> {
    let service = ConsultationNoteService::new(&config);

    let note = service.remove(&id).await?;

    Ok(Json(note))
}
