pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;

pub use models::{
    ConsultationNoteListQuery, CreateConsultationNoteRequest, UpdateConsultationNoteRequest,
};
pub use router::consultation_note_routes;
pub use services::ConsultationNoteService;
