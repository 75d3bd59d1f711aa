//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in AudioBook Nexus                        │
//! │                                                                         │
//! │  View / CLI                  Rust Backend                               │
//! │  ──────────                  ────────────                               │
//! │                                                                         │
//! │  add_to_cart("4")                                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Logged out? ──── CoreError::AuthRequired ────────┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  Unknown id? ──── CoreError::NotFound ─────────► ApiError ─────►│  │
//! │  │         │                                          ▲             │  │
//! │  │         ▼                                          │             │  │
//! │  │  Save failed? ─── DbError::QueryFailed ────────────┘             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Serialization
//! Errors carry a machine-readable `code` and a human-readable `message`,
//! so the view can branch on the code and show the message as-is.

use nexus_core::CoreError;
use nexus_db::DbError;
use serde::Serialize;
use thiserror::Error;

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "AUTH_REQUIRED",
///   "message": "Please log in to add items to your cart"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
///
/// ## Usage in the View
/// ```typescript
/// try {
///   await addToCart(id);
/// } catch (e) {
///   switch (e.code) {
///     case 'AUTH_REQUIRED':
///       router.push('/login');
///       break;
///     case 'NOT_FOUND':
///       showNotFound();
///       break;
///     default:
///       toast(e.message);
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Caller must sign in first (401)
    AuthRequired,

    /// Unknown sort key, page 0 and similar (400)
    InvalidArgument,

    /// Credential or form validation failed (400)
    ValidationError,

    /// Snapshot storage failed (500)
    DatabaseError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts storage errors to API errors.
///
/// Details are logged; the view only sees a generic message.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Serialization(e) => {
                tracing::error!("Snapshot serialization failed: {}", e);
                ApiError::internal("Could not save storefront state")
            }
            other => {
                tracing::error!("Database operation failed: {}", other);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
///
/// Borrowing form, for callers that still need the error afterwards (a
/// failed sign-in is also recorded in the session).
impl From<&CoreError> for ApiError {
    fn from(err: &CoreError) -> Self {
        let code = match err {
            CoreError::AuthRequired { .. } => ErrorCode::AuthRequired,
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::InvalidArgument { .. } => ErrorCode::InvalidArgument,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        ApiError::from(&err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexus_core::ValidationError;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = ApiError::from(CoreError::auth_required("add items to your cart"));
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert_eq!(err.message, "Please log in to add items to your cart");

        let err = ApiError::from(CoreError::not_found("Audiobook", "99"));
        assert_eq!(err.code, ErrorCode::NotFound);

        let err = ApiError::from(CoreError::invalid_argument("sort key", "unknown"));
        assert_eq!(err.code, ErrorCode::InvalidArgument);

        let err = ApiError::from(CoreError::from(ValidationError::TooShort {
            field: "Password".to_string(),
            min: 6,
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Password must be at least 6 characters");
    }

    #[test]
    fn test_db_errors_hide_details() {
        let err = ApiError::from(DbError::QueryFailed("no such table: snapshots".to_string()));
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert!(!err.message.contains("snapshots"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("Audiobook", "x")).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Audiobook not found: x");
    }
}
