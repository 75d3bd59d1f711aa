//! # Error Types
//!
//! Domain-specific error types for nexus-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  nexus-core errors (this file)                                          │
//! │  ├── CoreError        - AuthRequired / NotFound / InvalidArgument       │
//! │  └── ValidationError  - Credential and form validation failures         │
//! │                                                                         │
//! │  nexus-db errors (separate crate)                                       │
//! │  └── DbError          - Snapshot store failures                         │
//! │                                                                         │
//! │  Storefront errors (in app)                                             │
//! │  └── ApiError         - What the view layer sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → View                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is locally recoverable. Nothing in the core panics on
//! well-typed input.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The caller is not signed in.
    ///
    /// ## When This Occurs
    /// - Adding to the cart while logged out
    /// - Toggling a favorite while logged out
    ///
    /// The state is left untouched; the caller decides whether to send the
    /// user to the login screen.
    #[error("Please log in to {action}")]
    AuthRequired { action: String },

    /// A catalog lookup found nothing.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// An argument is well-typed but not acceptable (unknown sort key, page 0).
    #[error("Invalid {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Validation error (wraps ValidationError). Displays the inner message.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an AuthRequired error for the given user-facing action.
    pub fn auth_required(action: impl Into<String>) -> Self {
        CoreError::AuthRequired {
            action: action.into(),
        }
    }

    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates an InvalidArgument error.
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before a credential ever reaches an authenticator.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be no more than {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., an email without `@`).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must agree do not (password confirmation).
    #[error("{field} does not match {other}")]
    Mismatch { field: String, other: String },

    /// A checkbox-style agreement was not given.
    #[error("{field} must be accepted")]
    NotAccepted { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::auth_required("add items to your cart");
        assert_eq!(err.to_string(), "Please log in to add items to your cart");

        let err = CoreError::not_found("Audiobook", "42");
        assert_eq!(err.to_string(), "Audiobook not found: 42");

        let err = CoreError::invalid_argument("sort key", "unknown value 'popularity'");
        assert_eq!(
            err.to_string(),
            "Invalid sort key: unknown value 'popularity'"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");

        let err = ValidationError::Mismatch {
            field: "password".to_string(),
            other: "confirmation".to_string(),
        };
        assert_eq!(err.to_string(), "password does not match confirmation");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "email".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
