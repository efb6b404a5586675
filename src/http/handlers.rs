//! HTTP request handlers for the grok-search MCP endpoint

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::types::HealthResponse;
use crate::mcp::handlers::ProtocolHandlers;

/// Health check handler
///
/// Returns `{ok: true, server: {name, version}}`.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

/// JSON-RPC handler
///
/// Accepts a single message or a batch. Bodies that are not JSON are
/// answered with an `Invalid Request` error carrying a null id. A lone
/// notification gets `202 Accepted` with an empty body.
pub async fn rpc_handler(
    State(handlers): State<Arc<ProtocolHandlers>>,
    body: Bytes,
) -> Response {
    let payload = serde_json::from_slice::<Value>(&body).unwrap_or_else(|e| {
        warn!("Unparseable RPC body: {}", e);
        Value::Null
    });
    debug!(payload = %payload, "RPC payload");

    match handlers.handle_payload(payload).await {
        Some(reply) => Json(reply).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}
