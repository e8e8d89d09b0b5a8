use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use shared_config::AppConfig;
use shared_models::{error::AppError, Patient, PatientWithNotes};
use shared_utils::extractor::{ApiPath, ApiQuery, ValidatedJson};

use crate::models::{CreatePatientRequest, PatientListQuery, UpdatePatientRequest};
use crate::services::PatientService;

/// Create a new patient. The email must be unique across all patients.
#[utoipa::path(
    post,
    path = "/patients",
    tag = "patients",
    request_body = CreatePatientRequest,
    responses(
        (status = 201, description = "Patient successfully created", body = PatientWithNotes),
        (status = 400, description = "Invalid input data"),
        (status = 409, description = "Email already exists")
    )
)]
#[axum::debug_handler]
pub async fn create_patient(
    State(config): State<Arc<AppConfig>>,
    ValidatedJson(request): ValidatedJson<CreatePatientRequest>,
) -> Result<(StatusCode, Json<PatientWithNotes>), AppError> {
    let service = PatientService::new(&config);

    let patient = service.create(request).await?;

    Ok((StatusCode::CREATED, Json(patient)))
}

/// List patients newest first, each with its consultation notes newest first.
#[utoipa::path(
    get,
    path = "/patients",
    tag = "patients",
    params(PatientListQuery),
    responses(
        (status = 200, description = "List of patients retrieved successfully", body = [PatientWithNotes])
    )
)]
#[axum::debug_handler]
pub async fn list_patients(
    State(config): State<Arc<AppConfig>>,
    ApiQuery(query): ApiQuery<PatientListQuery>,
) -> Result<Json<Vec<PatientWithNotes>>, AppError> {
    let service = PatientService::new(&config);

    let patients = service.find_all(query.status.as_deref()).await?;

    Ok(Json(patients))
}

/// Get a patient with all of its consultation notes.
#[utoipa::path(
    get,
    path = "/patients/{id}",
    tag = "patients",
    params(("id" = String, Path, description = "UUID of the patient")),
    responses(
        (status = 200, description = "Patient found and returned successfully", body = PatientWithNotes),
        (status = 404, description = "Patient not found")
    )
)]
#[axum::debug_handler]
pub async fn get_patient(
    State(config): State<Arc<AppConfig>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<PatientWithNotes>, AppError> {
    let service = PatientService::new(&config);

    let patient = service.find_one(&id).await?;

    Ok(Json(patient))
}

/// Update only the supplied fields of a patient.
#[utoipa::path(
    patch,
    path = "/patients/{id}",
    tag = "patients",
    params(("id" = String, Path, description = "UUID of the patient to update")),
    request_body = UpdatePatientRequest,
    responses(
        (status = 200, description = "Patient updated successfully", body = PatientWithNotes),
        (status = 400, description = "Invalid input data"),
        (status = 404, description = "Patient not found"),
        (status = 409, description = "Email already exists")
    )
)]
#[axum::debug_handler]
pub async fn update_patient(
    State(config): State<Arc<AppConfig>>,
    ApiPath(id): ApiPath<String>,
    ValidatedJson(request): ValidatedJson<UpdatePatientRequest>,
) -> Result<Json<PatientWithNotes>, AppError> {
    let service = PatientService::new(&config);

    let patient = service.update(&id, request).await?;

    Ok(Json(patient))
}

/// Delete a patient and all of its consultation notes. Returns the deleted patient.
#[utoipa::path(
    delete,
    path = "/patients/{id}",
    tag = "patients",
    params(("id" = String, Path, description = "UUID of the patient to delete")),
    responses(
        (status = 200, description = "Patient deleted successfully", body = Patient),
        (status = 404, description = "Patient not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_patient(
    State(config): State<Arc<AppConfig>>,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Patient>, AppError> {
    let service = PatientService::new(&config);

    let patient = service.remove(&id).await?;

    Ok(Json(patient))
}
