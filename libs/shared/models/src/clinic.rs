use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle tag on a patient. `All` is also the list-filter sentinel meaning
/// "no filter".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatientStatus {
    All,
    Pending,
    Past,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::All => "all",
            PatientStatus::Pending => "pending",
            PatientStatus::Past => "past",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatientStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(PatientStatus::All),
            "pending" => Ok(PatientStatus::Pending),
            "past" => Ok(PatientStatus::Past),
            other => Err(format!("unknown patient status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Uuid,
    #[schema(example = "John Smith")]
    pub name: String,
    #[schema(example = "Male")]
    pub gender: String,
    #[schema(example = 35, minimum = 0, maximum = 150)]
    pub age: i32,
    #[schema(example = "https://i.pravatar.cc/150?img=12")]
    pub avatar: String,
    pub status: PatientStatus,
    #[schema(example = "+1 (555) 555-0115")]
    pub phone: String,
    #[schema(example = "smith.johnny@gmail.com")]
    pub email: String,
    #[schema(example = "26-11-2024")]
    pub last_appointment: String,
    #[schema(example = "31-11-2024")]
    pub upcoming_appointment: String,
    pub created_at: DateTime<Utc>,
}

/// A patient together with its consultation notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatientWithNotes {
    #[serde(flatten)]
    pub patient: Patient,
    pub consultation_notes: Vec<ConsultationNote>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationNote {
    pub id: Uuid,
    #[schema(example = "Getting better")]
    pub title: String,
    pub description: String,
    /// Free-form date string, not validated as a calendar date.
    #[schema(example = "26-11-2024")]
    pub date: String,
    pub patient_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// A consultation note with its owning patient embedded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationNoteWithPatient {
    #[serde(flatten)]
    pub note: ConsultationNote,
    pub patient: Patient,
}
