//! Transport layer.
//!
//! Accepts terminal clients over WebSocket and hands each one to the
//! session manager as an isolated [`SessionHandle`](crate::SessionHandle).
//! The plain HTTP routes exist for health checks and operational
//! visibility only.

mod proto;
mod ws;

pub use proto::ClientMessage;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::{any, get};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;

use crate::error::Error;
use crate::session::SessionManager;
use crate::Result;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<SessionManager>,
}

/// Create the router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/terminal", any(ws::terminal_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "OK"
}

/// Service information endpoint.
async fn info(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "termpaste",
        "version": env!("CARGO_PKG_VERSION"),
        "sessions": state.manager.registry().count(),
    }))
}

/// Server bind configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 2222,
        }
    }
}

/// Start the server and run until a shutdown signal arrives.
///
/// On ctrl-c the listener closes; sessions already attached are dropped
/// with their tasks when the process exits.
pub async fn serve(config: ServerConfig, state: AppState) -> Result<()> {
    let addr = config.bind_address();
    let router = create_router(state);

    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(Error::Io)?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e.to_string())))?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::error!("failed to listen for shutdown signal: {e}");
            // Without a signal to wait for, never resolve: shutting down
            // immediately would kill every session for no reason.
            std::future::pending::<()>().await;
        }
    }
}
