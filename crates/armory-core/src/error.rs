//! # Error Types
//!
//! Domain-specific error types for armory-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  armory-core errors (this file)                                        │
//! │  ├── CoreError        - Lifecycle and domain rule violations           │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  armory-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  armory-cache errors (separate crate)                                  │
//! │  └── CacheError       - Redis operation failures                       │
//! │                                                                         │
//! │  API errors (in app)                                                   │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → HTTP response          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (gadget ID, status, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::types::GadgetStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// These errors represent lifecycle rule violations or domain logic failures.
/// They are caught in the API layer and translated to HTTP status codes.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Gadget cannot be found.
    ///
    /// ## When This Occurs
    /// - Gadget ID doesn't exist in the database
    /// - Gadget exists but belongs to a different user (ownership is
    ///   checked in the same query, so both cases look identical)
    #[error("Gadget not found: {0}")]
    GadgetNotFound(String),

    /// Requested status change is not a legal lifecycle transition.
    ///
    /// ## Lifecycle
    /// ```text
    /// Available ──► Decommissioned ──► Destroyed
    ///     │                                ▲
    ///     └────────────────────────────────┘
    /// ```
    /// Anything moving right-to-left on this diagram lands here.
    #[error("Gadget cannot transition from {from} to {to}")]
    InvalidTransition { from: GadgetStatus, to: GadgetStatus },

    /// Gadget is already decommissioned.
    ///
    /// Raised by the decommission operation so callers get a precise
    /// message instead of a generic transition error.
    #[error("Gadget is already decommissioned: {0}")]
    AlreadyDecommissioned(String),

    /// Gadget is already destroyed.
    ///
    /// Destroyed is fully terminal; no operation may touch the gadget again.
    #[error("Gadget is already destroyed: {0}")]
    AlreadyDestroyed(String),

    /// Self-destruct was attempted without a confirmation code.
    #[error("Confirmation code is required")]
    ConfirmationRequired,

    /// Supplied confirmation code doesn't match the issued one.
    ///
    /// Carries the currently valid code so the caller can retry within the
    /// code's lifetime. This mirrors the two-call protocol: first call
    /// issues a code, second call confirms it.
    #[error("Invalid confirmation code")]
    ConfirmationMismatch { valid_code: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before domain logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {}", .allowed.join(", "))]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Shorthand for a missing-field error.
    pub fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
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
        let err = CoreError::InvalidTransition {
            from: GadgetStatus::Destroyed,
            to: GadgetStatus::Available,
        };
        assert_eq!(
            err.to_string(),
            "Gadget cannot transition from Destroyed to Available"
        );

        let err = CoreError::ConfirmationMismatch {
            valid_code: "123456".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid confirmation code");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("email");
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        };
        assert_eq!(err.to_string(), "password must be at least 8 characters");

        let err = ValidationError::NotAllowed {
            field: "status".to_string(),
            allowed: vec!["Available".to_string(), "Destroyed".to_string()],
        };
        assert_eq!(err.to_string(), "status must be one of: Available, Destroyed");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::required("status");
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
