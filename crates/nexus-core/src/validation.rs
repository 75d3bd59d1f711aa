//! # Validation Module
//!
//! Credential and input checks for AudioBook Nexus.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View / CLI                                                    │
//! │  └── Argument parsing, required flags                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                   │
//! │  ├── Email shape, password length, display name length                  │
//! │  └── Registration form: confirmation matches, terms accepted            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Authenticator                                                 │
//! │  └── Only ever sees credentials that passed layer 2                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use nexus_core::validation::{validate_email, validate_password};
//!
//! assert!(validate_email("reader@example.com").is_ok());
//! assert!(validate_password("hunter").is_ok());
//! assert!(validate_password("short").is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum password length accepted at login and registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum display name length at registration (after trimming).
pub const MIN_NAME_LEN: usize = 2;

/// Longest search query the browse page accepts.
pub const MAX_SEARCH_LEN: usize = 100;

// =============================================================================
// Credential Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Exactly one `@`, with text on both sides
/// - No whitespace
///
/// Deliberately loose: the authenticator is the authority on whether the
/// address exists.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "Email".to_string(),
        });
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "Email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            if domain.contains('@') {
                Err(invalid("must contain a single '@'"))
            } else {
                Ok(())
            }
        }
        _ => Err(invalid("must look like name@domain")),
    }
}

/// Validates a password.
///
/// ## Rules
/// - At least [`MIN_PASSWORD_LEN`] characters (not trimmed, spaces count)
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "Password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates a display name and returns it trimmed.
///
/// ## Rules
/// - At least [`MIN_NAME_LEN`] characters after trimming
pub fn validate_display_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::TooShort {
            field: "Name".to_string(),
            min: MIN_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates an email login attempt.
pub fn validate_login(email: &str, password: &str) -> ValidationResult<()> {
    validate_email(email)?;
    validate_password(password)
}

// =============================================================================
// Registration Form
// =============================================================================

/// Everything the registration form collects.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub name: String,
    pub accept_terms: bool,
}

/// Validates a registration form.
///
/// ## Check Order
/// ```text
/// confirm_password == password? ──no──► Mismatch
///          │ yes
///          ▼
/// accept_terms? ──────────────────no──► NotAccepted
///          │ yes
///          ▼
/// email ──► password ──► name     (first failure wins)
/// ```
///
/// Returns the trimmed display name on success.
pub fn validate_registration(form: &RegistrationForm) -> ValidationResult<String> {
    if form.password != form.confirm_password {
        return Err(ValidationError::Mismatch {
            field: "Password confirmation".to_string(),
            other: "password".to_string(),
        });
    }

    if !form.accept_terms {
        return Err(ValidationError::NotAccepted {
            field: "Terms and conditions".to_string(),
        });
    }

    validate_email(&form.email)?;
    validate_password(&form.password)?;
    validate_display_name(&form.name)
}

// =============================================================================
// Browse Input
// =============================================================================

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum [`MAX_SEARCH_LEN`] characters after trimming
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            email: "new@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            name: "  Ada Lovelace ".to_string(),
            accept_terms: true,
        }
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("reader@example.com").is_ok());
        assert!(validate_email("  reader@example.com ").is_ok());

        assert!(matches!(validate_email(""), Err(ValidationError::Required { .. })));
        assert!(validate_email("   ").is_err());
        assert!(validate_email("reader").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("reader@").is_err());
        assert!(validate_email("a@b@c").is_err());
        assert!(validate_email("re ader@example.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("secret").is_ok());
        assert!(validate_password("      ").is_ok());

        let err = validate_password("short").unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn test_validate_display_name() {
        assert_eq!(validate_display_name("  Al ").unwrap(), "Al");

        let err = validate_display_name(" A ").unwrap_err();
        assert_eq!(err.to_string(), "Name must be at least 2 characters");
    }

    #[test]
    fn test_validate_login() {
        assert!(validate_login("reader@example.com", "secret").is_ok());
        assert!(validate_login("reader", "secret").is_err());
        assert!(validate_login("reader@example.com", "123").is_err());
    }

    #[test]
    fn test_validate_registration() {
        assert_eq!(validate_registration(&form()).unwrap(), "Ada Lovelace");
    }

    #[test]
    fn test_registration_mismatch_checked_first() {
        let mut f = form();
        f.confirm_password = "different".to_string();
        f.accept_terms = false;
        f.email = String::new();

        assert!(matches!(
            validate_registration(&f),
            Err(ValidationError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_registration_requires_terms() {
        let mut f = form();
        f.accept_terms = false;

        let err = validate_registration(&f).unwrap_err();
        assert_eq!(err.to_string(), "Terms and conditions must be accepted");
    }

    #[test]
    fn test_registration_field_rules() {
        let mut f = form();
        f.name = "A".to_string();
        assert!(matches!(
            validate_registration(&f),
            Err(ValidationError::TooShort { min: MIN_NAME_LEN, .. })
        ));

        let mut f = form();
        f.password = "12345".to_string();
        f.confirm_password = "12345".to_string();
        assert!(matches!(
            validate_registration(&f),
            Err(ValidationError::TooShort { min: MIN_PASSWORD_LEN, .. })
        ));
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  dune ").unwrap(), "dune");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
        assert!(validate_search_query(&"x".repeat(100)).is_ok());
    }
}
