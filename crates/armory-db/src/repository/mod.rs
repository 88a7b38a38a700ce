//! # Repository Module
//!
//! Database repository implementations for Armory.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service call                                                          │
//! │       │                                                                 │
//! │       │  db.gadgets().find_by_id_and_owner(id, user_id)                │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  GadgetRepository                                                      │
//! │  ├── insert(&self, user_id, name)                                      │
//! │  ├── find_by_id_and_owner(&self, id, user_id)                          │
//! │  ├── list_by_owner(&self, user_id, status)                             │
//! │  └── update / decommission / destroy                                   │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  PostgreSQL                                                            │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Ownership scoping cannot be forgotten at call sites                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - Account lookup and creation
//! - [`gadget::GadgetRepository`] - Gadget CRUD and lifecycle writes
//! - [`refresh_token::RefreshTokenRepository`] - Persisted refresh tokens

pub mod gadget;
pub mod refresh_token;
pub mod user;
