// ABOUTME: Shared application state for the maillist JSON server.
// ABOUTME: Holds the store handle that every handler reads and writes through.

use std::sync::Arc;

use maillist_store::EmailStore;

/// Shared application state accessible by all Axum handlers.
pub struct AppState {
    pub store: EmailStore,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(store: EmailStore) -> Self {
        Self { store }
    }
}
