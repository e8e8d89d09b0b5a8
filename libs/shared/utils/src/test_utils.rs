use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;

pub struct TestConfig {
    pub supabase_url: String,
    pub supabase_service_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_key: "test-service-key".to_string(),
        }
    }
}

impl TestConfig {
    /// Points the config at a mock PostgREST server.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            supabase_url: url.into(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_service_key: self.supabase_service_key.clone(),
            port: 3000,
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

/// Row fixtures shaped the way PostgREST returns them.
pub struct MockSupabaseResponses;

impl MockSupabaseResponses {
    pub fn patient_row(id: Uuid, email: &str, status: &str) -> Value {
        json!({
            "id": id,
            "name": "John Smith",
            "gender": "Male",
            "age": 35,
            "avatar": "https://i.pravatar.cc/150?img=12",
            "status": status,
            "phone": "+1 (555) 555-0115",
            "email": email,
            "last_appointment": "26-11-2024",
            "upcoming_appointment": "31-11-2024",
            "created_at": "2024-11-26T10:00:00.000000+00:00"
        })
    }

    pub fn patient_row_with_notes(id: Uuid, email: &str, notes: Vec<Value>) -> Value {
        let mut row = Self::patient_row(id, email, "pending");
        row["consultation_notes"] = Value::Array(notes);
        row
    }

    pub fn note_row(id: Uuid, patient_id: Uuid, title: &str, created_at: DateTime<Utc>) -> Value {
        json!({
            "id": id,
            "title": title,
            "description": "Patient reports improved glucose control.",
            "date": "26-11-2024",
            "patient_id": patient_id,
            "created_at": created_at.to_rfc3339()
        })
    }

    pub fn note_row_with_patient(id: Uuid, patient_id: Uuid, title: &str) -> Value {
        let mut row = Self::note_row(id, patient_id, title, Utc::now());
        row["patient"] = Self::patient_row(patient_id, "john@x.com", "pending");
        row
    }

    /// Three notes for one patient created one hour apart, newest first.
    pub fn notes_newest_first(patient_id: Uuid) -> Vec<Value> {
        let t1 = Utc::now() - Duration::hours(3);
        vec![
            Self::note_row(Uuid::new_v4(), patient_id, "t3", t1 + Duration::hours(2)),
            Self::note_row(Uuid::new_v4(), patient_id, "t2", t1 + Duration::hours(1)),
            Self::note_row(Uuid::new_v4(), patient_id, "t1", t1),
        ]
    }

    pub fn unique_violation(email: &str) -> Value {
        json!({
            "code": "23505",
            "details": format!("Key (email)=({}) already exists.", email),
            "hint": null,
            "message": "duplicate key value violates unique constraint \"patients_email_key\""
        })
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "code": code,
            "details": null,
            "hint": null,
            "message": message
        })
    }
}
