/// Form input validation
use crate::submission::SubmissionDraft;
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

/// Something, `@`, something, `.`, something - no whitespace and no extra `@`
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    EmptyField,
    #[error("Invalid email address")]
    InvalidEmail,
}

/// Check the three form fields and return them trimmed
///
/// Rules:
/// 1. Every field must be non-empty after trimming whitespace
/// 2. The email must look like `local@domain.tld` (structural check only)
pub fn validate(name: &str, email: &str, message: &str) -> Result<SubmissionDraft, ValidationError> {
    let (name, email, message) = (name.trim(), email.trim(), message.trim());

    if name.is_empty() || email.is_empty() || message.is_empty() {
        return Err(ValidationError::EmptyField);
    }

    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(SubmissionDraft {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

pub fn is_valid(name: &str, email: &str, message: &str) -> bool {
    validate(name, email, message).is_ok()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_is_trimmed() {
        let draft = validate("  Ada ", " ada@example.com\n", "\tHello there ").unwrap();

        assert_eq!(draft.name, "Ada");
        assert_eq!(draft.email, "ada@example.com");
        assert_eq!(draft.message, "Hello there");
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(validate("", "a@b.com", "hi"), Err(ValidationError::EmptyField));
        assert_eq!(validate("Ada", "   ", "hi"), Err(ValidationError::EmptyField));
        assert_eq!(validate("Ada", "a@b.com", " \t\n"), Err(ValidationError::EmptyField));
        assert!(!is_valid("", "", ""));
    }

    #[test]
    fn test_empty_field_reported_before_bad_email() {
        assert_eq!(validate("", "not-an-email", "hi"), Err(ValidationError::EmptyField));
    }

    #[test]
    fn test_malformed_emails() {
        for email in ["a@b", "a.com", "@b.com", "a@.com", "a@b.", "a b@c.com", "a@b@c.com"] {
            assert_eq!(
                validate("Ada", email, "hi"),
                Err(ValidationError::InvalidEmail),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_well_formed_emails() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last@mail.example.co.uk"));
        assert!(is_valid("Ada", "a@b.com", "hi"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::EmptyField.to_string(), "Please fill in all fields");
        assert_eq!(ValidationError::InvalidEmail.to_string(), "Invalid email address");
    }
}
