//! # HTTP Module
//!
//! The axum surface of the Armory API.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  POST   /auth/register               201  UserPublic                │
//! │  POST   /auth/login                  200  { tokens, user }          │
//! │  POST   /auth/refresh                200  { accessToken }           │
//! │  POST   /auth/logout          [auth] 204                            │
//! │  GET    /gadgets?status=      [auth] 200  [GadgetView]              │
//! │  POST   /gadgets              [auth] 201  Gadget                    │
//! │  PATCH  /gadgets/{id}         [auth] 200  Gadget                    │
//! │  DELETE /gadgets/{id}         [auth] 200  Gadget    (decommission)  │
//! │  POST   /gadgets/{id}/self-destruct                                 │
//! │                               [auth] 200  { message, gadget }       │
//! │  GET    /health                      200 | 503                      │
//! │                                                                     │
//! │  [auth] = AuthUser extractor (Bearer access token)                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failures render through [`ApiError`](crate::error::ApiError) as
//! `{ error, code }` with the status the taxonomy dictates.

pub mod auth_routes;
pub mod extract;
pub mod gadget_routes;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the application router with tracing and permissive CORS.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/auth/register", post(auth_routes::register))
        .route("/auth/login", post(auth_routes::login))
        .route("/auth/refresh", post(auth_routes::refresh))
        .route("/auth/logout", post(auth_routes::logout))
        .route(
            "/gadgets",
            get(gadget_routes::list).post(gadget_routes::create),
        )
        .route(
            "/gadgets/{id}",
            patch(gadget_routes::update).delete(gadget_routes::decommission),
        )
        .route(
            "/gadgets/{id}/self-destruct",
            post(gadget_routes::self_destruct),
        )
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Health
// =============================================================================

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    database: bool,
    cache: bool,
}

/// `GET /health`: liveness of both backing stores.
///
/// 200 when Postgres and Redis both answer, 503 otherwise. The body names
/// the failing component either way.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = state.db.health_check().await;
    let cache = state.cache.health_check().await;

    let all_up = database && cache;
    let status = if all_up {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = HealthResponse {
        status: if all_up { "ok" } else { "degraded" },
        database,
        cache,
    };

    (status, Json(body))
}
