// ABOUTME: JSON/HTTP front end for maillist, mapping JSON bodies onto the subscriber store.
// ABOUTME: Uses Axum with the store handle injected through shared state.

pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, MaillistConfig};
pub use error::ApiError;
pub use routes::{create_router, serve};
