use std::sync::LazyLock;

use regex::Regex;

use shared_models::{error::AppError, Patch};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email regex is valid")
});

pub const MAX_EMAIL_LENGTH: usize = 254;

pub fn validate_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Request payloads checked after JSON decoding.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

/// Collects every constraint failure in a payload so the caller sees them all at once.
#[derive(Debug, Default)]
pub struct Validator {
    issues: Vec<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn non_empty(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.issues.push(format!("{} should not be empty", field));
        }
        self
    }

    pub fn range(&mut self, field: &str, value: i32, min: i32, max: i32) -> &mut Self {
        if value < min {
            self.issues.push(format!("{} must not be less than {}", field, min));
        } else if value > max {
            self.issues.push(format!("{} must not be greater than {}", field, max));
        }
        self
    }

    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !validate_email(value) {
            self.issues.push(format!("{} must be an email", field));
        }
        self
    }

    /// Rejects an explicit `null` for a field that cannot be cleared.
    pub fn not_null<T>(&mut self, field: &str, value: &Patch<T>) -> &mut Self {
        if value.is_null() {
            self.issues.push(format!("{} must not be null", field));
        }
        self
    }

    pub fn patch_non_empty(&mut self, field: &str, value: &Patch<String>) -> &mut Self {
        self.not_null(field, value);
        if let Patch::Value(inner) = value {
            self.non_empty(field, inner);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn finish(&self) -> Result<(), AppError> {
        if self.issues.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(self.issues.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("john@x.com"));
        assert!(validate_email("smith.johnny+tag@gmail.com"));
        assert!(!validate_email("john@x"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email(""));

        let long = format!("{}@example.com", "a".repeat(250));
        assert!(!validate_email(&long));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut validator = Validator::new();
        validator.range("age", 0, 0, 150).range("age", 150, 0, 150);
        assert!(validator.is_empty());

        let mut validator = Validator::new();
        validator.range("age", 151, 0, 150);
        assert_matches!(validator.finish(), Err(AppError::ValidationError(msg)) if msg == "age must not be greater than 150");

        let mut validator = Validator::new();
        validator.range("age", -1, 0, 150);
        assert_matches!(validator.finish(), Err(AppError::ValidationError(msg)) if msg == "age must not be less than 0");
    }

    #[test]
    fn test_collects_all_issues() {
        let mut validator = Validator::new();
        validator.non_empty("name", " ").email("email", "nope");
        assert_matches!(
            validator.finish(),
            Err(AppError::ValidationError(msg)) if msg == "name should not be empty; email must be an email"
        );
    }

    #[test]
    fn test_patch_rules() {
        let mut validator = Validator::new();
        validator
            .patch_non_empty("name", &Patch::Missing)
            .patch_non_empty("phone", &Patch::Value("+1 555".to_string()));
        assert!(validator.finish().is_ok());

        let mut validator = Validator::new();
        validator.patch_non_empty("name", &Patch::Null);
        assert_matches!(validator.finish(), Err(AppError::ValidationError(msg)) if msg == "name must not be null");
    }
}
