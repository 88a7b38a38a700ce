//! Account and token handlers.
//!
//! Request bodies deserialize every field as `Option` so that a missing
//! field produces the taxonomy's `ValidationError` envelope instead of a
//! bare deserialization rejection. Register and login share the combined
//! "Email and password are required" message; the service layer then owns
//! the field-level rules (normalization, password length, uniqueness).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use armory_core::error::ValidationError;
use armory_core::types::UserPublic;

use crate::error::{ApiError, ApiResult};
use crate::services::{AuthUser, LoginResponse};
use crate::state::AppState;

// =============================================================================
// Request / Response Bodies
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /auth/register`: create an account, 201 with the public user.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<UserPublic>)> {
    let (email, password) = credentials(req.email, req.password)?;
    let user = state.auth.register(&email, &password).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// `POST /auth/login`: verify credentials, issue both tokens.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let (email, password) = credentials(req.email, req.password)?;
    let response = state.auth.login(&email, &password).await?;

    Ok(Json(response))
}

/// `POST /auth/refresh`: exchange a live refresh token for a new access
/// token. No rotation: the refresh token stays valid until logout or expiry.
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let token = present(req.refresh_token.as_deref())
        .ok_or_else(|| ApiError::auth("Refresh token required"))?;

    let access_token = state.auth.refresh(token).await?;

    Ok(Json(RefreshResponse { access_token }))
}

/// `POST /auth/logout`: revoke one refresh token for the caller, 204.
///
/// Revoking a token that is already gone still succeeds; the outcome, not
/// the row count, is the contract.
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<LogoutRequest>,
) -> ApiResult<StatusCode> {
    let token = present(req.refresh_token.as_deref())
        .ok_or_else(|| ApiError::from(ValidationError::required("refreshToken")))?;

    state.auth.logout(token, &user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

/// Both credential fields, or the combined requirement message.
fn credentials(email: Option<String>, password: Option<String>) -> ApiResult<(String, String)> {
    match (email, password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            Ok((email, password))
        }
        _ => Err(ApiError::validation("Email and password are required")),
    }
}

/// Filters an optional field down to a usable value.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_requires_both_fields() {
        assert!(credentials(Some("a@b.example".into()), Some("secret".into())).is_ok());

        for (email, password) in [
            (None, Some("secret".to_string())),
            (Some("a@b.example".to_string()), None),
            (None, None),
            (Some("   ".to_string()), Some("secret".to_string())),
            (Some("a@b.example".to_string()), Some(String::new())),
        ] {
            let err = credentials(email, password).unwrap_err();
            assert_eq!(err.message, "Email and password are required");
        }
    }

    #[test]
    fn test_present_filters_blank() {
        assert_eq!(present(Some("  token  ")), Some("token"));
        assert_eq!(present(Some("   ")), None);
        assert_eq!(present(None), None);
    }
}
