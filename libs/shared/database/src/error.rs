use serde::Deserialize;
use thiserror::Error;

use shared_models::error::AppError;

/// SQLSTATE raised by Postgres for a unique constraint violation.
pub const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE raised by Postgres for a foreign key violation.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Error body returned by PostgREST.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PostgrestError {
    pub code: Option<String>,
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
}

impl PostgrestError {
    /// Parses a PostgREST error body, keeping the raw text when it is not JSON.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_| Self {
            code: None,
            message: body.to_string(),
            details: None,
            hint: None,
        })
    }
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("API error ({status}): {}", .error.message)]
    Api { status: u16, error: PostgrestError },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

impl DatabaseError {
    /// SQLSTATE code reported by the database, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            DatabaseError::Api { error, .. } => error.code.as_deref(),
            _ => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        self.code() == Some(UNIQUE_VIOLATION)
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        self.code() == Some(FOREIGN_KEY_VIOLATION)
    }
}

impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        AppError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_postgrest_body() {
        let body = r#"{"code":"23505","details":"Key (email)=(a@b.com) already exists.","hint":null,"message":"duplicate key value violates unique constraint \"patients_email_key\""}"#;
        let err = DatabaseError::Api {
            status: 409,
            error: PostgrestError::from_body(body),
        };

        assert!(err.is_unique_violation());
        assert!(!err.is_foreign_key_violation());
        assert_eq!(err.code(), Some("23505"));
    }

    #[test]
    fn test_keeps_plain_text_body() {
        let error = PostgrestError::from_body("Bad Gateway");
        assert_eq!(error.code, None);
        assert_eq!(error.message, "Bad Gateway");
    }

    #[test]
    fn test_converts_to_internal_app_error() {
        let err = DatabaseError::UnexpectedResponse("empty representation".to_string());
        let app_error: AppError = err.into();
        assert!(matches!(app_error, AppError::Database(_)));
    }
}
