//! `linops-server` — lightweight webhook relay for Linear events.
//!
//! Receives deliveries on `POST /webhook`, verifies the HMAC signature
//! against the raw body, and optionally relays the payload to a configured
//! downstream URL. Everything else about processing events lives downstream.

pub mod error;
pub mod routes;
pub mod signature;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

pub use state::AppState;

/// Build the axum Router with all routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/webhook", post(routes::webhook::receive))
        .route("/health", get(routes::health::health))
        .layer(cors)
        .with_state(state)
}

/// Start the relay server on the given port.
pub async fn serve(state: AppState, port: u16) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await?;
    serve_on(state, listener).await
}

/// Start the relay server on a pre-bound listener.
///
/// Accepting a `TcpListener` lets the caller bind port 0 and read back the
/// OS-assigned port before starting.
pub async fn serve_on(state: AppState, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let port = listener.local_addr()?.port();
    let app = build_router(state);
    tracing::info!("webhook relay listening on http://localhost:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}
