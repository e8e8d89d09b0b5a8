pub mod clinic;
pub mod error;
pub mod patch;

pub use clinic::{
    ConsultationNote, ConsultationNoteWithPatient, Patient, PatientStatus, PatientWithNotes,
};
pub use error::AppError;
pub use patch::Patch;
