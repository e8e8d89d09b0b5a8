pub mod docs;
pub mod router;
