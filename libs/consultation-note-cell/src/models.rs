use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use shared_models::{error::AppError, Patch};
use shared_utils::validation::{Validate, Validator};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateConsultationNoteRequest {
    #[schema(example = "Getting better")]
    pub title: String,
    #[schema(example = "Patient reports improved glucose control. A1C decreased from 7.2 to 6.8.")]
    pub description: String,
    #[schema(example = "26-11-2024")]
    pub date: String,
    pub patient_id: Uuid,
}

impl CreateConsultationNoteRequest {
    pub fn to_row(&self) -> Value {
        json!({
            "title": self.title,
            "description": self.description,
            "date": self.date,
            "patient_id": self.patient_id,
        })
    }
}

impl Validate for CreateConsultationNoteRequest {
    fn validate(&self) -> Result<(), AppError> {
        let mut validator = Validator::new();
        validator
            .non_empty("title", &self.title)
            .non_empty("description", &self.description)
            .non_empty("date", &self.date);
        validator.finish()
    }
}

/// Partial note update. The owning patient cannot be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateConsultationNoteRequest {
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    #[schema(value_type = Option<String>)]
    pub title: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    #[schema(value_type = Option<String>)]
    pub description: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_missing")]
    #[schema(value_type = Option<String>)]
    pub date: Patch<String>,
}

impl UpdateConsultationNoteRequest {
    pub fn to_columns(&self) -> Map<String, Value> {
        let mut columns = Map::new();
        if let Patch::Value(v) = &self.title {
            columns.insert("title".to_string(), json!(v));
        }
        if let Patch::Value(v) = &self.description {
            columns.insert("description".to_string(), json!(v));
        }
        if let Patch::Value(v) = &self.date {
            columns.insert("date".to_string(), json!(v));
        }
        columns
    }

    pub fn is_empty(&self) -> bool {
        self.to_columns().is_empty()
    }
}

impl Validate for UpdateConsultationNoteRequest {
    fn validate(&self) -> Result<(), AppError> {
        let mut validator = Validator::new();
        validator
            .patch_non_empty("title", &self.title)
            .patch_non_empty("description", &self.description)
            .patch_non_empty("date", &self.date);
        validator.finish()
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ConsultationNoteListQuery {
    /// Only return notes for this patient UUID. The patient is not required to exist.
    pub patient_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_create_requires_uuid_patient_id() {
        let body = json!({
            "title": "Getting better",
            "description": "Improved",
            "date": "26-11-2024",
            "patientId": "patient-1"
        });
        assert!(serde_json::from_value::<CreateConsultationNoteRequest>(body).is_err());
    }

    #[test]
    fn test_create_row_uses_column_names() {
        let patient_id = Uuid::new_v4();
        let request: CreateConsultationNoteRequest = serde_json::from_value(json!({
            "title": "Getting better",
            "description": "Improved",
            "date": "26-11-2024",
            "patientId": patient_id
        }))
        .unwrap();

        assert!(request.validate().is_ok());
        assert_eq!(request.to_row()["patient_id"], json!(patient_id));
    }

    #[test]
    fn test_create_rejects_blank_title() {
        let request: CreateConsultationNoteRequest = serde_json::from_value(json!({
            "title": "",
            "description": "Improved",
            "date": "26-11-2024",
            "patientId": Uuid::new_v4()
        }))
        .unwrap();
        assert_matches!(request.validate(), Err(AppError::ValidationError(msg)) if msg == "title should not be empty");
    }

    #[test]
    fn test_update_cannot_move_note_to_another_patient() {
        let body = json!({ "patientId": Uuid::new_v4() });
        assert!(serde_json::from_value::<UpdateConsultationNoteRequest>(body).is_err());
    }

    #[test]
    fn test_update_columns_only_include_supplied_fields() {
        let request: UpdateConsultationNoteRequest =
            serde_json::from_value(json!({ "title": "Stable" })).unwrap();
        assert_eq!(Value::Object(request.to_columns()), json!({ "title": "Stable" }));
        assert!(!request.is_empty());
        assert!(UpdateConsultationNoteRequest::default().is_empty());
    }
}
