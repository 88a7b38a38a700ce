//! Bearer-token extraction for protected routes.
//!
//! [`AuthUser`] implements [`FromRequestParts`], so a protected handler
//! declares the caller as an argument and never sees the raw header:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  Request ──► Authorization: Bearer <jwt>                         │
//! │                 │                                                │
//! │                 ▼                                                │
//! │  bearer_token() ── missing / wrong scheme / blank ──► 401        │
//! │                 │                                                │
//! │                 ▼                                                │
//! │  AuthService::authenticate ── expired / invalid / no user ─► 401 │
//! │                 │                                                │
//! │                 ▼                                                │
//! │  AuthUser { id, email } handed to the handler                    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;

use crate::error::ApiError;
use crate::services::AuthUser;
use crate::state::AppState;

/// Pulls the token out of a `Bearer` authorization header.
///
/// `None` for a missing header, a different scheme, or a blank token.
/// The scheme match is case-sensitive.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::auth("Authentication required"))?;

        state.auth.authenticate(token).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_trims_padding() {
        let headers = headers_with("Bearer   abc.def.ghi  ");
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_is_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn test_other_scheme_is_none() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_scheme_is_case_sensitive() {
        let headers = headers_with("bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_blank_token_is_none() {
        let headers = headers_with("Bearer    ");
        assert_eq!(bearer_token(&headers), None);
    }
}
