use utoipa::OpenApi;

use consultation_note_cell::handlers as notes;
use consultation_note_cell::models::{CreateConsultationNoteRequest, UpdateConsultationNoteRequest};
use patient_cell::handlers as patients;
use patient_cell::models::{CreatePatientRequest, UpdatePatientRequest};
use shared_models::{
    ConsultationNote, ConsultationNoteWithPatient, Patient, PatientStatus, PatientWithNotes,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Patient Management API",
        version = "1.0",
        description = "CRUD operations for patient records and their consultation notes."
    ),
    paths(
        patients::create_patient,
        patients::list_patients,
        patients::get_patient,
        patients::update_patient,
        patients::delete_patient,
        notes::create_consultation_note,
        notes::list_consultation_notes,
        notes::list_patient_consultation_notes,
        notes::get_consultation_note,
        notes::update_consultation_note,
        notes::delete_consultation_note,
    ),
    components(schemas(
        Patient,
        PatientStatus,
        PatientWithNotes,
        ConsultationNote,
        ConsultationNoteWithPatient,
        CreatePatientRequest,
        UpdatePatientRequest,
        CreateConsultationNoteRequest,
        UpdateConsultationNoteRequest,
    )),
    tags(
        (name = "patients", description = "Create, read, update and delete patient records"),
        (name = "consultation-notes", description = "Manage consultation notes for patients")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for expected in [
            "/patients",
            "/patients/{id}",
            "/consultation-notes",
            "/consultation-notes/{id}",
            "/consultation-notes/patient/{patient_id}",
        ] {
            assert!(paths.contains(&expected), "missing {}", expected);
        }
    }
}
