pub mod error;
pub mod schema;
pub mod supabase;

pub use error::{DatabaseError, PostgrestError};
pub use supabase::SupabaseClient;
