use assert_matches::assert_matches;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use consultation_note_cell::models::{CreateConsultationNoteRequest, UpdateConsultationNoteRequest};
use consultation_note_cell::services::ConsultationNoteService;
use shared_models::error::AppError;
use shared_utils::test_utils::{MockSupabaseResponses, TestConfig};

fn service_for(mock_server: &MockServer) -> ConsultationNoteService {
    ConsultationNoteService::new(&TestConfig::with_url(mock_server.uri()).to_app_config())
}

fn create_request(patient_id: Uuid) -> CreateConsultationNoteRequest {
    CreateConsultationNoteRequest {
        title: "Getting better".to_string(),
        description: "Patient reports improved glucose control.".to_string(),
        date: "26-11-2024".to_string(),
        patient_id,
    }
}

#[tokio::test]
async fn test_patient_deleted_before_insert_is_not_found() {
    let mock_server = MockServer::start().await;
    let patient_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/patients"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": patient_id }])))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/consultation_notes"))
        .respond_with(ResponseTemplate::new(409).set_body_json(
            MockSupabaseResponses::error_response(
                "insert or update on table \"consultation_notes\" violates foreign key constraint",
                "23503",
            ),
        ))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = service.create(create_request(patient_id)).await.unwrap_err();
    assert_matches!(err, AppError::NotFound(msg) if msg.contains(&patient_id.to_string()));
}

#[tokio::test]
async fn test_storage_failure_is_internal() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/rest/v1/consultation_notes"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let err = service.find_all(None).await.unwrap_err();
    assert_matches!(err, AppError::Database(_));
}

#[tokio::test]
async fn test_empty_patient_id_filter_lists_everything() {
    let mock_server = MockServer::start().await;
    let patient_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/consultation_notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::note_row_with_patient(Uuid::new_v4(), patient_id, "Only")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let notes = service.find_all(Some("")).await.unwrap();
    assert_eq!(notes.len(), 1);

    let requests = mock_server.received_requests().await.unwrap();
    assert!(!requests[0].url.query_pairs().any(|(key, _)| key == "patient_id"));
}

#[tokio::test]
async fn test_empty_update_reads_note() {
    let mock_server = MockServer::start().await;
    let note_id = Uuid::new_v4();

    Mock::given(method("GET"))
        .and(path("/rest/v1/consultation_notes"))
        .and(query_param("id", format!("eq.{}", note_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            MockSupabaseResponses::note_row_with_patient(note_id, Uuid::new_v4(), "Unchanged")
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let service = service_for(&mock_server);
    let note = service
        .update(&note_id.to_string(), UpdateConsultationNoteRequest::default())
        .await
        .unwrap();
    assert_eq!(note.note.title, "Unchanged");
}

#[tokio::test]
async fn test_non_uuid_note_id_is_not_found() {
    let mock_server = MockServer::start().await;

    let service = service_for(&mock_server);
    assert_matches!(service.find_one("abc").await, Err(AppError::NotFound(_)));
    assert_matches!(service.remove("abc").await, Err(AppError::NotFound(_)));
    assert_matches!(service.find_by_patient("abc").await, Err(AppError::NotFound(msg)) if msg == "Patient with ID abc not found");
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
