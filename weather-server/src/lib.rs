//! HTTP surface of the weather app.
//!
//! Exposes `GET /search` and `GET /weather` (also under `/api`) on top of
//! `weather-core`. Every failure is turned into a JSON `{"error": ...}` body.

pub mod api;
pub mod error;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use weather_core::{Config, provider_from_config};

pub use api::AppState;
pub use error::ApiError;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .nest("/api", api::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl-C.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    let state = AppState::new(provider_from_config(config));

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    let local = listener
        .local_addr()
        .context("Failed to read bound address")?;
    tracing::info!("Weather server running at http://{local}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated unexpectedly")?;

    tracing::info!("Weather server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {err}");
        std::future::pending::<()>().await;
    }
}
