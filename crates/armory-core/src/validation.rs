//! # Validation Module
//!
//! Input validation utilities for Armory.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Axum extraction (Rust)                                       │
//! │  ├── Type validation (JSON deserialization)                            │
//! │  └── Rejects malformed bodies before handlers run                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Presence and length rules                                         │
//! │  └── Status strings resolved to typed GadgetStatus                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (PostgreSQL)                                        │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (email)                                        │
//! │  └── CHECK constraint on gadget status                                 │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use armory_core::validation::{validate_email, validate_status};
//! use armory_core::types::GadgetStatus;
//!
//! assert_eq!(validate_email("  Hunt@IMF.example ").unwrap(), "hunt@imf.example");
//! assert_eq!(validate_status("Destroyed").unwrap(), GadgetStatus::Destroyed);
//! ```

use crate::error::ValidationError;
use crate::types::GadgetStatus;
use crate::MIN_PASSWORD_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Account Validators
// =============================================================================

/// Validates a login email.
///
/// ## Rules
/// - Must not be empty after trimming
///
/// ## Returns
/// The normalized form: trimmed and lowercased. All lookups and inserts
/// use the normalized form so `Hunt@Example.com` and `hunt@example.com`
/// are the same account.
pub fn validate_email(email: &str) -> ValidationResult<String> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    Ok(email.to_lowercase())
}

/// Validates a credential at registration time.
///
/// ## Rules
/// - Must not be empty
/// - Must be at least [`MIN_PASSWORD_LENGTH`] characters
///
/// The raw credential is measured as given; surrounding whitespace counts,
/// since it also counts when the credential is hashed and verified.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Status Validator
// =============================================================================

/// Resolves a raw status string to a typed [`GadgetStatus`].
///
/// Anything unrecognized, including the empty string, reports the full
/// set of allowed values so clients can self-correct.
pub fn validate_status(raw: &str) -> ValidationResult<GadgetStatus> {
    GadgetStatus::parse(raw.trim()).ok_or_else(|| ValidationError::NotAllowed {
        field: "status".to_string(),
        allowed: GadgetStatus::ALL.iter().map(|s| s.to_string()).collect(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert_eq!(validate_email("hunt@imf.example").unwrap(), "hunt@imf.example");
        assert_eq!(validate_email("  Hunt@IMF.example ").unwrap(), "hunt@imf.example");

        assert!(validate_email("").is_err());
        assert!(validate_email("   ").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("correct horse battery staple").is_ok());

        assert!(validate_password("").is_err());
        assert!(validate_password("1234567").is_err());
    }

    #[test]
    fn test_validate_status() {
        assert_eq!(validate_status("Available").unwrap(), GadgetStatus::Available);
        assert_eq!(
            validate_status(" Decommissioned ").unwrap(),
            GadgetStatus::Decommissioned
        );

        assert!(validate_status("").is_err());
        assert!(validate_status("available").is_err());
        assert!(validate_status("Launched").is_err());
    }

    #[test]
    fn test_unknown_status_lists_allowed_values() {
        let err = validate_status("Broken").unwrap_err();
        assert_eq!(
            err.to_string(),
            "status must be one of: Available, Decommissioned, Destroyed"
        );
    }
}
