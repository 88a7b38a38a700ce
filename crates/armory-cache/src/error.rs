//! # Cache Error Types
//!
//! Error types for the Redis adapter.
//!
//! The adapter is strict: every failure surfaces as a `CacheError`.
//! Callers that want best-effort semantics (the gadget service does)
//! log and move on; that policy does not live here.

use thiserror::Error;

/// Cache operation errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Could not establish the initial connection.
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),

    /// A command failed against an established connection.
    ///
    /// The connection manager keeps reconnecting behind the scenes, so
    /// a command error here is transient unless the store stays down.
    #[error("Cache command failed: {0}")]
    Command(String),

    /// A cached payload could not be serialized or deserialized.
    ///
    /// ## When This Occurs
    /// - A deploy changed the snapshot shape while old entries were live
    /// - Something else wrote a non-JSON value under our key
    #[error("Cache serialization failed: {0}")]
    Serialization(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Command(err.to_string())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_error_maps_to_serialization() {
        let bad = serde_json::from_str::<Vec<String>>("{not json");
        let err: CacheError = bad.unwrap_err().into();
        assert!(matches!(err, CacheError::Serialization(_)));
    }
}
