//! # armory-db: Database Layer for Armory
//!
//! This crate provides database access for the Armory service.
//! It uses PostgreSQL with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Armory Data Flow                                │
//! │                                                                         │
//! │  Service call (gadgets.list, auth.register, ...)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     armory-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  (user.rs,    │    │  (embedded)  │  │   │
//! │  │   │               │    │   gadget.rs,  │    │              │  │   │
//! │  │   │ PgPool        │◄───│   refresh_    │    │ 001_initial_ │  │   │
//! │  │   │ Connection    │    │   token.rs)   │    │ schema.sql   │  │   │
//! │  │   │ Management    │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     PostgreSQL                                  │   │
//! │  │   users • gadgets • refresh_tokens                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (user, gadget, refresh token)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use armory_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("postgres://localhost/armory");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let gadget = db.gadgets().insert(user_id, "The Kraken-42").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::gadget::GadgetRepository;
pub use repository::refresh_token::RefreshTokenRepository;
pub use repository::user::UserRepository;
