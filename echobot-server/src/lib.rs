//! echobot Server - HTTP surface for the static chatbot stand-in
//!
//! This crate provides:
//! - The `(path, method)` router and its canned responders
//! - A serverless function entry point (`function::handle`)
//! - An axum router for serving the same routes locally

pub mod error;
pub mod function;
pub mod reply;
pub mod router;
pub mod routes;

use anyhow::Context;
use axum::{
    routing::{any, get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use function::{handle, handle_request, FunctionEvent, FunctionResponse};
pub use reply::Reply;
pub use router::Route;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    /// Directory holding `templates/` and `static/`
    pub asset_root: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5001,
            asset_root: PathBuf::from("site"),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: ServerConfig) -> Router {
    let not_found = routes::not_found_handler;
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Landing page
        .route("/", get(routes::index::index_handler).fallback(not_found))
        // Chat API
        .route("/chat", post(routes::chat::chat_handler).fallback(not_found))
        .route("/reset", post(routes::reset::reset_handler).fallback(not_found))
        // Static assets, any method
        .route("/static/*path", any(routes::assets::static_handler))
        // Deployed function URLs
        .route(
            "/.netlify/functions/:name",
            any(function::function_handler),
        )
        .route(
            "/.netlify/functions/:name/*rest",
            any(function::function_handler),
        )
        .fallback(not_found)
        // Shared state
        .with_state(Arc::new(config))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server and run until Ctrl-C
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    tracing::info!("echobot server starting on http://{}", addr);
    tracing::info!("Assets served from: {}", config.asset_root.display());

    let router = create_router(config);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("echobot server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
