//! JWT authentication module.
//!
//! Handles token generation and validation. Access and refresh tokens are
//! signed with *distinct* secrets, so a refresh token can never pass access
//! validation even if the `token_type` claim were forged.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Email the token is bound to
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,

    /// Token type ("access" or "refresh")
    pub token_type: String,
}

/// JWT token manager.
pub struct JwtManager {
    access_secret: String,
    refresh_secret: String,
    access_lifetime_secs: i64,
    refresh_lifetime_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(
        access_secret: String,
        refresh_secret: String,
        access_lifetime_secs: i64,
        refresh_lifetime_secs: i64,
    ) -> Self {
        JwtManager {
            access_secret,
            refresh_secret,
            access_lifetime_secs,
            refresh_lifetime_secs,
        }
    }

    /// Generate an access token bound to (user id, email).
    pub fn generate_access_token(&self, user_id: &str, email: &str) -> ApiResult<String> {
        self.generate(
            user_id,
            email,
            "access",
            &self.access_secret,
            self.access_lifetime_secs,
        )
    }

    /// Generate a refresh token bound to (user id, email).
    pub fn generate_refresh_token(&self, user_id: &str, email: &str) -> ApiResult<String> {
        self.generate(
            user_id,
            email,
            "refresh",
            &self.refresh_secret,
            self.refresh_lifetime_secs,
        )
    }

    /// Expiry instant a refresh token issued now will carry.
    ///
    /// Used to persist the matching `refresh_tokens` row.
    pub fn refresh_expiry(&self) -> DateTime<Utc> {
        Utc::now() + Duration::seconds(self.refresh_lifetime_secs)
    }

    fn generate(
        &self,
        user_id: &str,
        email: &str,
        token_type: &str,
        secret: &str,
        lifetime_secs: i64,
    ) -> ApiResult<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(lifetime_secs);

        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: token_type.to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| ApiError::internal(format!("Failed to generate token: {}", e)))
    }

    /// Validate an access token and return its claims.
    pub fn validate_access_token(&self, token: &str) -> ApiResult<Claims> {
        self.validate(token, &self.access_secret, "access")
    }

    /// Validate a refresh token and return its claims.
    pub fn validate_refresh_token(&self, token: &str) -> ApiResult<Claims> {
        self.validate(token, &self.refresh_secret, "refresh")
    }

    /// Validate a token against a secret and an expected type.
    ///
    /// Expired signatures are reported distinctly so the client can tell a
    /// stale token from a broken one; every other decode failure (bad
    /// signature, wrong key, malformed, wrong `token_type`) is "invalid".
    fn validate(&self, token: &str, secret: &str, expected_type: &str) -> ApiResult<Claims> {
        let (expired_msg, invalid_msg) = if expected_type == "refresh" {
            ("Refresh token expired", "Invalid refresh token")
        } else {
            ("Token expired", "Invalid token")
        };

        let validation = Validation::default();

        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => ApiError::auth(expired_msg),
            _ => ApiError::auth(invalid_msg),
        })?;

        if token_data.claims.token_type != expected_type {
            return Err(ApiError::auth(invalid_msg));
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn test_manager() -> JwtManager {
        JwtManager::new(
            "access-secret".to_string(),
            "refresh-secret".to_string(),
            3600,
            604800,
        )
    }

    #[test]
    fn test_jwt_roundtrip() {
        let manager = test_manager();

        let access_token = manager
            .generate_access_token("user-001", "q@armory.test")
            .unwrap();

        let claims = manager.validate_access_token(&access_token).unwrap();

        assert_eq!(claims.sub, "user-001");
        assert_eq!(claims.email, "q@armory.test");
        assert_eq!(claims.token_type, "access");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_refresh_token_roundtrip() {
        let manager = test_manager();

        let refresh_token = manager
            .generate_refresh_token("user-001", "q@armory.test")
            .unwrap();

        let claims = manager.validate_refresh_token(&refresh_token).unwrap();
        assert_eq!(claims.token_type, "refresh");
    }

    #[test]
    fn test_wrong_token_type() {
        let manager = test_manager();

        let access_token = manager
            .generate_access_token("user-001", "q@armory.test")
            .unwrap();

        // An access token is signed with the access key, so refresh
        // validation fails at the signature long before the type check.
        let err = manager.validate_refresh_token(&access_token).unwrap_err();
        assert_eq!(err.message, "Invalid refresh token");
    }

    #[test]
    fn test_distinct_keys_reject_cross_validation() {
        let manager = test_manager();

        let refresh_token = manager
            .generate_refresh_token("user-001", "q@armory.test")
            .unwrap();

        let err = manager.validate_access_token(&refresh_token).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthError);
        assert_eq!(err.message, "Invalid token");
    }

    #[test]
    fn test_forged_type_claim_rejected() {
        // Sign a "refresh"-typed token with the access key. The signature
        // verifies, so only the type check can stop it.
        let manager = test_manager();
        let now = Utc::now();
        let claims = Claims {
            sub: "user-001".to_string(),
            email: "q@armory.test".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(3600)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: "refresh".to_string(),
        };
        let forged = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"access-secret"),
        )
        .unwrap();

        let err = manager.validate_access_token(&forged).unwrap_err();
        assert_eq!(err.message, "Invalid token");
    }

    #[test]
    fn test_expired_token_classified() {
        let manager = test_manager();
        let now = Utc::now();
        // Well past the default validation leeway
        let claims = Claims {
            sub: "user-001".to_string(),
            email: "q@armory.test".to_string(),
            iat: (now - Duration::seconds(7200)).timestamp(),
            exp: (now - Duration::seconds(3600)).timestamp(),
            jti: Uuid::new_v4().to_string(),
            token_type: "access".to_string(),
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"access-secret"),
        )
        .unwrap();

        let err = manager.validate_access_token(&expired).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthError);
        assert_eq!(err.message, "Token expired");
    }

    #[test]
    fn test_garbage_token_rejected() {
        let manager = test_manager();
        let err = manager
            .validate_access_token("not.a.token")
            .unwrap_err();
        assert_eq!(err.message, "Invalid token");
    }

    #[test]
    fn test_refresh_expiry_in_the_future() {
        let manager = test_manager();
        let expiry = manager.refresh_expiry();
        let delta = expiry - Utc::now();
        assert!(delta.num_seconds() > 604000);
    }
}
