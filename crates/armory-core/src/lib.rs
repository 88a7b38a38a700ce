//! # armory-core: Pure Domain Logic for Armory
//!
//! This crate is the **heart** of Armory, the gadget inventory service.
//! It contains all domain rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Armory Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      HTTP Clients                               │   │
//! │  │    register ──► login ──► list gadgets ──► self-destruct       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON over HTTP                         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    apps/api (Axum)                              │   │
//! │  │    auth handlers, gadget handlers, token extraction            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ armory-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │ codename  │  │  random   │  │ validation│  │   │
//! │  │   │  Gadget   │  │ prefixes  │  │  source   │  │   rules   │  │   │
//! │  │   │  lifecycle│  │ codes     │  │  trait    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          armory-db (Postgres)    armory-cache (Redis)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Gadget, GadgetStatus, RefreshToken)
//! - [`codename`] - Codename, probability and confirmation code generation
//! - [`random`] - Injectable randomness source (deterministic in tests)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Randomness is injected through [`random::RandomSource`],
//!    so every function is deterministic under test
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Typed Lifecycle**: Status transitions are a total function over
//!    [`types::GadgetStatus`], never string comparisons
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use armory_core::types::GadgetStatus;
//!
//! // The lifecycle is a one-way street:
//! assert!(GadgetStatus::Available.can_transition_to(GadgetStatus::Destroyed));
//! assert!(!GadgetStatus::Destroyed.can_transition_to(GadgetStatus::Available));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codename;
pub mod error;
pub mod random;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use armory_core::Gadget` instead of
// `use armory_core::types::Gadget`

pub use error::{CoreError, CoreResult, ValidationError};
pub use random::{RandomSource, ThreadRandom};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum length for account credentials.
///
/// ## Why a constant?
/// The registration handler and any future password-change flow must agree
/// on this value, so it lives here rather than in the API layer.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Number of digits in a self-destruct confirmation code.
///
/// Codes are generated in the range 100000..=999999, so the leading digit
/// is never zero and the code always prints as six characters.
pub const CONFIRMATION_CODE_DIGITS: usize = 6;
