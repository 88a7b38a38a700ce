//! Error types for the Armory API.
//!
//! Every failure that reaches the HTTP boundary is an [`ApiError`]: a
//! taxonomy code, a human-readable message, and (only for the self-destruct
//! confirmation mismatch) the true code the client should retry with.
//!
//! ## Wire format
//! ```json
//! { "error": "Invalid confirmation code", "code": "VALIDATION_ERROR", "validCode": "483920" }
//! ```
//!
//! Cache failures never become an `ApiError`. The services log and swallow
//! them, which is why there is no `From<CacheError>` here.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use armory_core::error::{CoreError, ValidationError};
use armory_db::DbError;

// =============================================================================
// Error Codes
// =============================================================================

/// The five-member error taxonomy.
///
/// Each code maps to exactly one HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Malformed, missing, or out-of-range input
    ValidationError,

    /// Missing, expired, or invalid credentials or tokens
    AuthError,

    /// Resource absent, or not owned by the caller (indistinguishable)
    NotFoundError,

    /// Illegal state transition or duplicate registration
    ConflictError,

    /// Persistence or other adapter failure not otherwise classified
    InternalError,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::AuthError => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFoundError => StatusCode::NOT_FOUND,
            ErrorCode::ConflictError => StatusCode::CONFLICT,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// =============================================================================
// API Error
// =============================================================================

/// Boundary error carried through services and handlers.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    /// Taxonomy code
    pub code: ErrorCode,

    /// Human-readable message
    pub message: String,

    /// True confirmation code, present only on a self-destruct mismatch
    pub valid_code: Option<String>,
}

impl ApiError {
    fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            valid_code: None,
        }
    }

    /// Malformed or missing input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    /// Credential or token failure.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthError, message)
    }

    /// Absent, or owned by someone else.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFoundError, message)
    }

    /// Illegal transition or duplicate.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConflictError, message)
    }

    /// Unclassified adapter failure. The underlying message is kept.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Self-destruct confirmation mismatch carrying the code to retry with.
    pub fn confirmation_mismatch(valid_code: impl Into<String>) -> Self {
        ApiError {
            code: ErrorCode::ValidationError,
            message: "Invalid confirmation code".to_string(),
            valid_code: Some(valid_code.into()),
        }
    }

    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }
}

/// Serialized body of an error response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: String,
    code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid_code: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.message,
            code: self.code,
            valid_code: self.valid_code,
        };
        (status, Json(body)).into_response()
    }
}

/// Result alias for service and handler signatures.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::GadgetNotFound(_) => ApiError::not_found(err.to_string()),
            CoreError::InvalidTransition { .. }
            | CoreError::AlreadyDecommissioned(_)
            | CoreError::AlreadyDestroyed(_) => ApiError::conflict(err.to_string()),
            CoreError::ConfirmationRequired => ApiError::validation(err.to_string()),
            CoreError::ConfirmationMismatch { valid_code } => {
                ApiError::confirmation_mismatch(valid_code)
            }
            CoreError::Validation(v) => v.into(),
        }
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match &err {
            DbError::NotFound { .. } => ApiError::not_found(err.to_string()),
            DbError::UniqueViolation { .. } => ApiError::conflict(err.to_string()),
            _ => {
                tracing::error!(error = %err, "Database failure");
                ApiError::internal(err.to_string())
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use armory_core::GadgetStatus;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::auth("x").status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_envelope_shape() {
        let body = ErrorBody {
            error: "Gadget not found".to_string(),
            code: ErrorCode::NotFoundError,
            valid_code: None,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["error"], "Gadget not found");
        assert_eq!(json["code"], "NOT_FOUND_ERROR");
        // Absent validCode is omitted, not null
        assert!(json.get("validCode").is_none());
    }

    #[test]
    fn test_mismatch_envelope_carries_valid_code() {
        let err = ApiError::confirmation_mismatch("483920");
        let body = ErrorBody {
            error: err.message.clone(),
            code: err.code,
            valid_code: err.valid_code.clone(),
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["validCode"], "483920");
    }

    #[test]
    fn test_core_error_mapping() {
        let conflict: ApiError = CoreError::InvalidTransition {
            from: GadgetStatus::Destroyed,
            to: GadgetStatus::Available,
        }
        .into();
        assert_eq!(conflict.code, ErrorCode::ConflictError);

        let not_found: ApiError = CoreError::GadgetNotFound("g-1".to_string()).into();
        assert_eq!(not_found.code, ErrorCode::NotFoundError);

        let required: ApiError = CoreError::ConfirmationRequired.into();
        assert_eq!(required.code, ErrorCode::ValidationError);
        assert!(required.valid_code.is_none());

        let mismatch: ApiError = CoreError::ConfirmationMismatch {
            valid_code: "100000".to_string(),
        }
        .into();
        assert_eq!(mismatch.code, ErrorCode::ValidationError);
        assert_eq!(mismatch.valid_code.as_deref(), Some("100000"));
    }

    #[test]
    fn test_db_error_mapping() {
        let nf: ApiError = DbError::not_found("Gadget", "g-1").into();
        assert_eq!(nf.code, ErrorCode::NotFoundError);

        let dup: ApiError = DbError::UniqueViolation {
            constraint: "users_email_key".to_string(),
        }
        .into();
        assert_eq!(dup.code, ErrorCode::ConflictError);
    }
}
