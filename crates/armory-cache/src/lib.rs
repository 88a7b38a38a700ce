//! # armory-cache: Cache Layer for Armory
//!
//! Redis-backed cache adapter. Holds derived, disposable projections:
//! gadget list snapshots and one-time self-destruct confirmation codes.
//! Nothing in here is ever the source of truth.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Armory Cache Flow                                │
//! │                                                                         │
//! │  GET /gadgets ──► boundary reads cache ──► hit? serve snapshot         │
//! │                         │ miss                                          │
//! │                         ▼                                               │
//! │                  service hits Postgres                                  │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                  writes fresh snapshot back (TTL 1h)                    │
//! │                                                                         │
//! │  Writes (create/update/decommission/destroy)                           │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                  delete the affected list keys                          │
//! │                                                                         │
//! │  Staleness bound: a crash between DB commit and invalidation leaves    │
//! │  stale entries until TTL expiry. That is the consistency contract.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`keys`] - Key namespace construction and TTL constants
//! - [`store`] - The Redis connection and get/set/delete operations
//! - [`error`] - Cache error types

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod keys;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CacheError, CacheResult};
pub use store::{CacheConfig, CacheStore};
