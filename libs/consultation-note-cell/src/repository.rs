use reqwest::Method;
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::schema::{
    ConsultationNoteRow, CONSULTATION_NOTES_TABLE, NOTE_WITH_PATIENT_SELECT, PATIENTS_TABLE,
};
use shared_database::{DatabaseError, SupabaseClient};
use shared_models::{ConsultationNote, ConsultationNoteWithPatient};

use crate::models::CreateConsultationNoteRequest;

/// Data access for the `consultation_notes` table.
pub struct ConsultationNoteRepository {
    supabase: SupabaseClient,
}

fn first_with_patient(
    rows: Vec<ConsultationNoteRow>,
) -> Result<Option<ConsultationNoteWithPatient>, DatabaseError> {
    rows.into_iter()
        .next()
        .map(ConsultationNoteWithPatient::try_from)
        .transpose()
}

impl ConsultationNoteRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn patient_exists(&self, patient_id: Uuid) -> Result<bool, DatabaseError> {
        let path = format!("{}?id=eq.{}&select=id", PATIENTS_TABLE, patient_id);
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(!rows.is_empty())
    }

    pub async fn insert(
        &self,
        request: &CreateConsultationNoteRequest,
    ) -> Result<ConsultationNoteWithPatient, DatabaseError> {
        let path = format!("{}?select={}", CONSULTATION_NOTES_TABLE, NOTE_WITH_PATIENT_SELECT);

        let rows: Vec<ConsultationNoteRow> = self
            .supabase
            .request_with_headers(
                Method::POST,
                &path,
                Some(request.to_row()),
                Some(SupabaseClient::return_representation()),
            )
            .await?;

        first_with_patient(rows)?.ok_or_else(|| {
            DatabaseError::UnexpectedResponse("insert returned no consultation note".to_string())
        })
    }

    /// Lists notes newest first with their patients, optionally for one patient.
    pub async fn list(
        &self,
        patient_id: Option<Uuid>,
    ) -> Result<Vec<ConsultationNoteWithPatient>, DatabaseError> {
        let mut path = format!(
            "{}?select={}&order=created_at.desc",
            CONSULTATION_NOTES_TABLE, NOTE_WITH_PATIENT_SELECT
        );
        if let Some(patient_id) = patient_id {
            path.push_str(&format!("&patient_id=eq.{}", patient_id));
        }

        let rows: Vec<ConsultationNoteRow> = self.supabase.request(Method::GET, &path, None).await?;
        debug!("Fetched {} consultation notes", rows.len());

        rows.into_iter()
            .map(ConsultationNoteWithPatient::try_from)
            .collect()
    }

    /// Notes for one patient, newest first, without the patient embedded.
    pub async fn list_for_patient(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<ConsultationNote>, DatabaseError> {
        let path = format!(
            "{}?patient_id=eq.{}&order=created_at.desc",
            CONSULTATION_NOTES_TABLE, patient_id
        );

        let rows: Vec<ConsultationNoteRow> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().map(ConsultationNote::from).collect())
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ConsultationNoteWithPatient>, DatabaseError> {
        let path = format!(
            "{}?id=eq.{}&select={}",
            CONSULTATION_NOTES_TABLE, id, NOTE_WITH_PATIENT_SELECT
        );

        let rows: Vec<ConsultationNoteRow> = self.supabase.request(Method::GET, &path, None).await?;
        first_with_patient(rows)
    }

    pub async fn update(
        &self,
        id: Uuid,
        columns: Map<String, Value>,
    ) -> Result<Option<ConsultationNoteWithPatient>, DatabaseError> {
        let path = format!(
            "{}?id=eq.{}&select={}",
            CONSULTATION_NOTES_TABLE, id, NOTE_WITH_PATIENT_SELECT
        );

        let rows: Vec<ConsultationNoteRow> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(Value::Object(columns)),
                Some(SupabaseClient::return_representation()),
            )
            .await?;

        first_with_patient(rows)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<ConsultationNote>, DatabaseError> {
        let path = format!("{}?id=eq.{}", CONSULTATION_NOTES_TABLE, id);

        let rows: Vec<ConsultationNoteRow> = self
            .supabase
            .request_with_headers(
                Method::DELETE,
                &path,
                None,
                Some(SupabaseClient::return_representation()),
            )
            .await?;

        Ok(rows.into_iter().next().map(ConsultationNote::from))
    }
}
