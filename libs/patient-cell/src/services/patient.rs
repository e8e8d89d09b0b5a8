use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::{error::AppError, Patient, PatientStatus, PatientWithNotes};

use crate::models::{CreatePatientRequest, UpdatePatientRequest};
use crate::repository::PatientRepository;

pub struct PatientService {
    repository: PatientRepository,
}

impl PatientService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            repository: PatientRepository::new(config),
        }
    }

    pub async fn create(&self, request: CreatePatientRequest) -> Result<PatientWithNotes, AppError> {
        debug!("Creating patient: {}", request.email);

        match self.repository.insert(&request).await {
            Ok(patient) => {
                debug!("Patient created with ID: {}", patient.patient.id);
                Ok(patient)
            }
            Err(e) if e.is_unique_violation() => {
                warn!("Rejected duplicate patient email: {}", request.email);
                Err(email_conflict(&request.email))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Returns every patient, or only those whose status equals `status` unless
    /// it is empty or the `all` sentinel.
    pub async fn find_all(&self, status: Option<&str>) -> Result<Vec<PatientWithNotes>, AppError> {
        let filter = status.filter(|s| !s.is_empty() && *s != PatientStatus::All.as_str());
        debug!("Listing patients with status filter: {:?}", filter);

        Ok(self.repository.list(filter).await?)
    }

    pub async fn find_one(&self, id: &str) -> Result<PatientWithNotes, AppError> {
        debug!("Fetching patient: {}", id);

        let patient_id = parse_patient_id(id)?;
        self.repository
            .find_by_id(patient_id)
            .await?
            .ok_or_else(|| patient_not_found(id))
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdatePatientRequest,
    ) -> Result<PatientWithNotes, AppError> {
        debug!("Updating patient: {}", id);

        let patient_id = parse_patient_id(id)?;

        // PostgREST rejects an empty PATCH body; nothing to change means a read.
        if request.is_empty() {
            return self
                .repository
                .find_by_id(patient_id)
                .await?
                .ok_or_else(|| patient_not_found(id));
        }

        match self.repository.update(patient_id, request.to_columns()).await {
            Ok(Some(patient)) => Ok(patient),
            Ok(None) => Err(patient_not_found(id)),
            Err(e) if e.is_unique_violation() => {
                let email = request.email.as_value().map(String::as_str).unwrap_or_default();
                warn!("Rejected duplicate patient email on update: {}", email);
                Err(email_conflict(email))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the patient and, through the cascade, all of its notes.
    pub async fn remove(&self, id: &str) -> Result<Patient, AppError> {
        debug!("Deleting patient: {}", id);

        let patient_id = parse_patient_id(id)?;
        self.repository
            .delete(patient_id)
            .await?
            .ok_or_else(|| patient_not_found(id))
    }
}

pub fn patient_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Patient with ID {} not found", id))
}

fn email_conflict(email: &str) -> AppError {
    AppError::Conflict(format!("Patient with email {} already exists", email))
}

/// A string that is not a UUID cannot identify a stored patient.
fn parse_patient_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| patient_not_found(id))
}
