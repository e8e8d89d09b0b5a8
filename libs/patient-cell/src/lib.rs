pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;

pub use models::{CreatePatientRequest, PatientListQuery, UpdatePatientRequest};
pub use router::patient_routes;
pub use services::PatientService;
