//! Service layer: the operations behind the HTTP surface.
//!
//! `AuthService` owns registration, login, token refresh, logout, and
//! bearer-token authentication. `GadgetService` owns the gadget lifecycle
//! and the cache population/invalidation that goes with it.

pub mod auth_service;
pub mod gadget_service;

pub use auth_service::{AuthService, AuthUser, LoginResponse};
pub use gadget_service::{GadgetService, SELF_DESTRUCT_MESSAGE};
