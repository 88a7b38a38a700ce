//! # Armory API
//!
//! HTTP server for the gadget armory: accounts, token pairs, and the
//! gadget lifecycle, backed by PostgreSQL with Redis list snapshots.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            Armory API                                   │
//! │                                                                         │
//! │  ┌────────────────────┐        ┌───────────────────────────────────┐   │
//! │  │    AuthService     │        │           GadgetService           │   │
//! │  │                    │        │                                   │   │
//! │  │ • register         │        │ • list (cache-first, write-after  │   │
//! │  │ • login            │        │   -read population)               │   │
//! │  │ • refresh          │        │ • create (random codename)        │   │
//! │  │ • logout           │        │ • update / decommission           │   │
//! │  │ • authenticate     │        │ • self-destruct (two-call code)   │   │
//! │  └─────────┬──────────┘        └────────┬──────────────┬───────────┘   │
//! │            │                            │              │               │
//! │            ▼                            ▼              ▼               │
//! │  ┌──────────────────┐        ┌──────────────┐  ┌──────────────┐       │
//! │  │   JwtManager     │        │  armory-db   │  │ armory-cache │       │
//! │  │ (two secrets:    │        │  PostgreSQL  │  │    Redis     │       │
//! │  │  access/refresh) │        │              │  │ (best-effort)│       │
//! │  └──────────────────┘        └──────────────┘  └──────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - listen port (default: 3000)
//! - `DATABASE_URL` - PostgreSQL connection string
//! - `REDIS_URL` - Redis connection string
//! - `JWT_SECRET` - access token signing secret
//! - `REFRESH_TOKEN_SECRET` - refresh token signing secret (must differ)
//! - `JWT_ACCESS_LIFETIME_SECS` - access token lifetime (default: 3600)
//! - `JWT_REFRESH_LIFETIME_SECS` - refresh token lifetime (default: 604800)
//! - `DB_MAX_CONNECTIONS` - connection pool cap (default: 20)
//! - `TOKEN_SWEEP_INTERVAL_SECS` - expired-token sweep cadence (default: 3600)

pub mod auth;
pub mod config;
pub mod error;
pub mod http;
pub mod services;
pub mod state;
pub mod tasks;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};
pub use http::create_router;
pub use state::AppState;
