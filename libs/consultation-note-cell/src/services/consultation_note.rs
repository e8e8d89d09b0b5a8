use tracing::{debug, warn};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::{error::AppError, ConsultationNote, ConsultationNoteWithPatient};

use crate::models::{CreateConsultationNoteRequest, UpdateConsultationNoteRequest};
use crate::repository::ConsultationNoteRepository;

pub struct ConsultationNoteService {
    repository: ConsultationNoteRepository,
}

impl ConsultationNoteService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            repository: ConsultationNoteRepository::new(config),
        }
    }

    /// Creates a note after confirming its patient exists.
    pub async fn create(
        &self,
        request: CreateConsultationNoteRequest,
    ) -> Result<ConsultationNoteWithPatient, AppError> {
        debug!("Creating consultation note for patient: {}", request.patient_id);

        if !self.repository.patient_exists(request.patient_id).await? {
            return Err(patient_not_found(&request.patient_id.to_string()));
        }

        match self.repository.insert(&request).await {
            Ok(note) => {
                debug!("Consultation note created with ID: {}", note.note.id);
                Ok(note)
            }
            // Patient deleted between the existence check and the insert.
            Err(e) if e.is_foreign_key_violation() => {
                warn!("Patient {} vanished before note insert", request.patient_id);
                Err(patient_not_found(&request.patient_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Lists all notes, or the notes of one patient. The patient's existence is
    /// not checked here: an unknown patient simply has no notes.
    pub async fn find_all(
        &self,
        patient_id: Option<&str>,
    ) -> Result<Vec<ConsultationNoteWithPatient>, AppError> {
        match patient_id.filter(|id| !id.is_empty()) {
            None => {
                debug!("Listing all consultation notes");
                Ok(self.repository.list(None).await?)
            }
            Some(id) => {
                debug!("Listing consultation notes for patient: {}", id);
                match Uuid::parse_str(id) {
                    Ok(patient_id) => Ok(self.repository.list(Some(patient_id)).await?),
                    Err(_) => Ok(Vec::new()),
                }
            }
        }
    }

    pub async fn find_one(&self, id: &str) -> Result<ConsultationNoteWithPatient, AppError> {
        debug!("Fetching consultation note: {}", id);

        let note_id = parse_note_id(id)?;
        self.repository
            .find_by_id(note_id)
            .await?
            .ok_or_else(|| note_not_found(id))
    }

    /// Lists a patient's notes, failing when the patient does not exist.
    pub async fn find_by_patient(&self, patient_id: &str) -> Result<Vec<ConsultationNote>, AppError> {
        debug!("Fetching consultation notes of patient: {}", patient_id);

        let id = Uuid::parse_str(patient_id).map_err(|_| patient_not_found(patient_id))?;
        if !self.repository.patient_exists(id).await? {
            return Err(patient_not_found(patient_id));
        }

        Ok(self.repository.list_for_patient(id).await?)
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateConsultationNoteRequest,
    ) -> Result<ConsultationNoteWithPatient, AppError> {
        debug!("Updating consultation note: {}", id);

        let note_id = parse_note_id(id)?;
        let found = if request.is_empty() {
            self.repository.find_by_id(note_id).await?
        } else {
            self.repository.update(note_id, request.to_columns()).await?
        };

        found.ok_or_else(|| note_not_found(id))
    }

    pub async fn remove(&self, id: &str) -> Result<ConsultationNote, AppError> {
        debug!("Deleting consultation note: {}", id);

        let note_id = parse_note_id(id)?;
        self.repository
            .delete(note_id)
            .await?
            .ok_or_else(|| note_not_found(id))
    }
}

fn patient_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Patient with ID {} not found", id))
}

fn note_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Consultation note with ID {} not found", id))
}

fn parse_note_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| note_not_found(id))
}
