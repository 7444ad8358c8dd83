// ABOUTME: Route definitions for the maillist JSON API and the listener loop that serves them.
// ABOUTME: Assembles the five email routes into a single Axum Router with shared state.

use std::future::Future;

use axum::Router;
use axum::routing::{get, post, put};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::app_state::SharedState;

/// Build the complete Axum router with all routes and shared state.
///
/// Each email route answers only its own method; everything else, HEAD
/// included, gets the empty 200 from `ignore_method`.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/email/create",
            post(api::emails::create_email).fallback(api::emails::ignore_method),
        )
        .route(
            "/email/get",
            get(api::emails::get_email)
                .head(api::emails::ignore_method)
                .fallback(api::emails::ignore_method),
        )
        .route(
            "/email/get_batch",
            get(api::emails::get_email_batch)
                .head(api::emails::ignore_method)
                .fallback(api::emails::ignore_method),
        )
        .route(
            "/email/update",
            put(api::emails::update_email).fallback(api::emails::ignore_method),
        )
        .route(
            "/email/delete",
            post(api::emails::delete_email).fallback(api::emails::ignore_method),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the JSON API on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(state: SharedState, listener: TcpListener, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("JSON API server listening on {}", addr);
    }
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Health check handler. Returns 200 OK with a simple JSON body.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}
