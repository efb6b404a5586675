//! HTTP adapter
//!
//! Serves the MCP JSON-RPC endpoint and a health check via axum. The
//! protocol itself lives in `crate::mcp`; this module only moves bytes.

pub mod handlers;
pub mod middleware;

pub use handlers::*;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::core::services::Services;
use crate::mcp::handlers::ProtocolHandlers;

/// Build the application router
pub fn router(services: Arc<Services>) -> Router {
    let handlers = Arc::new(ProtocolHandlers::new(services));

    Router::new()
        .route("/", get(health_handler).post(rpc_handler))
        .route("/mcp", post(rpc_handler))
        .route("/mcp/", post(rpc_handler))
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(handlers)
}
