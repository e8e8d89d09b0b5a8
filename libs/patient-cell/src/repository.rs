use reqwest::Method;
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::schema::{
    PatientRow, EMBEDDED_NOTES_ORDER, PATIENTS_TABLE, PATIENT_WITH_NOTES_SELECT,
};
use shared_database::{DatabaseError, SupabaseClient};
use shared_models::{Patient, PatientWithNotes};

use crate::models::CreatePatientRequest;

/// Data access for the `patients` table.
pub struct PatientRepository {
    supabase: SupabaseClient,
}

impl PatientRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    /// Inserts a patient. A duplicate email surfaces as a unique violation from
    /// the database, never as a pre-check here.
    pub async fn insert(
        &self,
        request: &CreatePatientRequest,
    ) -> Result<PatientWithNotes, DatabaseError> {
        let rows: Vec<PatientRow> = self
            .supabase
            .request_with_headers(
                Method::POST,
                PATIENTS_TABLE,
                Some(request.to_row()),
                Some(SupabaseClient::return_representation()),
            )
            .await?;

        rows.into_iter()
            .next()
            .map(PatientWithNotes::from)
            .ok_or_else(|| DatabaseError::UnexpectedResponse("insert returned no patient".to_string()))
    }

    /// Lists patients newest first with their notes newest first, optionally
    /// restricted to an exact status value.
    pub async fn list(&self, status: Option<&str>) -> Result<Vec<PatientWithNotes>, DatabaseError> {
        let mut path = format!(
            "{}?select={}&{}&order=created_at.desc",
            PATIENTS_TABLE, PATIENT_WITH_NOTES_SELECT, EMBEDDED_NOTES_ORDER
        );
        if let Some(status) = status {
            path.push_str(&format!("&status=eq.{}", urlencoding::encode(status)));
        }

        let rows: Vec<PatientRow> = self.supabase.request(Method::GET, &path, None).await?;
        debug!("Fetched {} patients", rows.len());

        Ok(rows.into_iter().map(PatientWithNotes::from).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PatientWithNotes>, DatabaseError> {
        let path = format!(
            "{}?id=eq.{}&select={}&{}",
            PATIENTS_TABLE, id, PATIENT_WITH_NOTES_SELECT, EMBEDDED_NOTES_ORDER
        );

        let rows: Vec<PatientRow> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().next().map(PatientWithNotes::from))
    }

    /// Writes the given columns. `None` means no patient has that id.
    pub async fn update(
        &self,
        id: Uuid,
        columns: Map<String, Value>,
    ) -> Result<Option<PatientWithNotes>, DatabaseError> {
        let path = format!(
            "{}?id=eq.{}&select={}",
            PATIENTS_TABLE, id, PATIENT_WITH_NOTES_SELECT
        );

        let rows: Vec<PatientRow> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(Value::Object(columns)),
                Some(SupabaseClient::return_representation()),
            )
            .await?;

        Ok(rows.into_iter().next().map(PatientWithNotes::from))
    }

    /// Deletes a patient; the foreign key cascades to its notes. Returns the
    /// deleted row, or `None` when no patient has that id.
    pub async fn delete(&self, id: Uuid) -> Result<Option<Patient>, DatabaseError> {
        let path = format!("{}?id=eq.{}", PATIENTS_TABLE, id);

        let rows: Vec<PatientRow> = self
            .supabase
            .request_with_headers(
                Method::DELETE,
                &path,
                None,
                Some(SupabaseClient::return_representation()),
            )
            .await?;

        Ok(rows.into_iter().next().map(Patient::from))
    }
}
