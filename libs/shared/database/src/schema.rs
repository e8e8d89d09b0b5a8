//! Table rows as PostgREST returns them, and their conversion into domain records.
//!
//! Column names are snake_case in the database and camelCase on the API, so rows
//! are never handed to callers directly.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use shared_models::{
    ConsultationNote, ConsultationNoteWithPatient, Patient, PatientStatus, PatientWithNotes,
};

use crate::error::DatabaseError;

pub const PATIENTS_TABLE: &str = "/rest/v1/patients";
pub const CONSULTATION_NOTES_TABLE: &str = "/rest/v1/consultation_notes";

/// Embeds a patient's notes in a patient query.
pub const PATIENT_WITH_NOTES_SELECT: &str = "*,consultation_notes(*)";
/// Orders embedded notes newest first.
pub const EMBEDDED_NOTES_ORDER: &str = "consultation_notes.order=created_at.desc";
/// Embeds the owning patient in a note query.
pub const NOTE_WITH_PATIENT_SELECT: &str = "*,patient:patients(*)";

#[derive(Debug, Clone, Deserialize)]
pub struct PatientRow {
    pub id: Uuid,
    pub name: String,
    pub gender: String,
    pub age: i32,
    pub avatar: String,
    pub status: PatientStatus,
    pub phone: String,
    pub email: String,
    pub last_appointment: String,
    pub upcoming_appointment: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub consultation_notes: Option<Vec<ConsultationNoteRow>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConsultationNoteRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: String,
    pub patient_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub patient: Option<Box<PatientRow>>,
}

impl From<PatientRow> for Patient {
    fn from(row: PatientRow) -> Self {
        Patient {
            id: row.id,
            name: row.name,
            gender: row.gender,
            age: row.age,
            avatar: row.avatar,
            status: row.status,
            phone: row.phone,
            email: row.email,
            last_appointment: row.last_appointment,
            upcoming_appointment: row.upcoming_appointment,
            created_at: row.created_at,
        }
    }
}

/// A row fetched without the notes embed converts with an empty note list.
impl From<PatientRow> for PatientWithNotes {
    fn from(mut row: PatientRow) -> Self {
        let consultation_notes = row
            .consultation_notes
            .take()
            .unwrap_or_default()
            .into_iter()
            .map(ConsultationNote::from)
            .collect();

        PatientWithNotes {
            patient: row.into(),
            consultation_notes,
        }
    }
}

impl From<ConsultationNoteRow> for ConsultationNote {
    fn from(row: ConsultationNoteRow) -> Self {
        ConsultationNote {
            id: row.id,
            title: row.title,
            description: row.description,
            date: row.date,
            patient_id: row.patient_id,
            created_at: row.created_at,
        }
    }
}

impl TryFrom<ConsultationNoteRow> for ConsultationNoteWithPatient {
    type Error = DatabaseError;

    fn try_from(mut row: ConsultationNoteRow) -> Result<Self, Self::Error> {
        let patient = row.patient.take().ok_or_else(|| {
            DatabaseError::UnexpectedResponse(format!(
                "consultation note {} returned without its patient",
                row.id
            ))
        })?;

        Ok(ConsultationNoteWithPatient {
            note: row.into(),
            patient: (*patient).into(),
        })
    }
}
