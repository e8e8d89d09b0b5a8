pub mod consultation_note;

pub use consultation_note::ConsultationNoteService;
