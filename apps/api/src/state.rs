//! Shared application state handed to every request handler.

use armory_cache::CacheStore;
use armory_db::Database;

use crate::services::{AuthService, GadgetService};

/// Process-wide state. Cheap to clone: every field is a handle.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub gadgets: GadgetService,

    /// Kept alongside the services for the health endpoint.
    pub db: Database,
    pub cache: CacheStore,
}

impl AppState {
    pub fn new(db: Database, cache: CacheStore, auth: AuthService, gadgets: GadgetService) -> Self {
        AppState {
            auth,
            gadgets,
            db,
            cache,
        }
    }
}
