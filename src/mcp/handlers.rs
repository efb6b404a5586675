//! MCP protocol method handlers
//!
//! Transport-agnostic: both the stdio loop and the HTTP endpoint hand
//! decoded JSON payloads to [`ProtocolHandlers::handle_payload`].

use crate::core::services::Services;
use crate::core::types::ServerIdentity;
use crate::mcp::error::McpError;
use crate::mcp::protocol::*;
use crate::mcp::tools::{GrokSearchHandler, ToolRegistry};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

pub struct ProtocolHandlers {
    tool_registry: ToolRegistry,
}

impl ProtocolHandlers {
    pub fn new(services: Arc<Services>) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(GrokSearchHandler::new(Arc::clone(
            &services.search,
        ))));

        Self {
            tool_registry: registry,
        }
    }

    /// Handle one transport payload: a single message or a batch
    ///
    /// Returns `None` when nothing should be sent back (a lone
    /// notification).
    pub async fn handle_payload(&self, payload: Value) -> Option<RpcReply> {
        match payload {
            Value::Array(messages) => {
                let mut responses = Vec::with_capacity(messages.len());
                for message in messages {
                    if let Some(response) = self.dispatch(message).await {
                        responses.push(response);
                    }
                }
                Some(RpcReply::Batch(responses))
            }
            message => self.dispatch(message).await.map(RpcReply::Single),
        }
    }

    /// Dispatch a single JSON-RPC message
    pub async fn dispatch(&self, message: Value) -> Option<JsonRpcResponse> {
        let request = match parse_envelope(&message) {
            Some(request) => request,
            None => {
                let id = message.get("id").cloned().unwrap_or(Value::Null);
                debug!("Rejecting invalid envelope");
                return Some(JsonRpcResponse::failure(
                    id,
                    McpError::InvalidRequest(message).into_rpc_error(),
                ));
            }
        };

        let notification = request.is_notification();
        let id = request.id.clone().unwrap_or(Value::Null);
        let method = request.method.clone();
        let outcome = self.route(request).await;

        if notification {
            debug!(method = %method, "Notification handled, no reply");
            return None;
        }

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(e) => {
                debug!(method = %method, code = e.code(), "Request failed: {}", e);
                JsonRpcResponse::failure(id, e.into_rpc_error())
            }
        })
    }

    async fn route(&self, request: JsonRpcRequest) -> Result<Value, McpError> {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tools_call(request.params).await,
            "notifications/initialized" => self.handle_initialized(),
            "ping" => Ok(json!({})),
            other => Err(McpError::MethodNotFound(other.to_string())),
        }
    }

    /// Handle initialize request
    pub fn handle_initialize(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: InitializeParams = params
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        let protocol_version = params
            .protocol_version
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PROTOCOL_VERSION.to_string());

        match params.client_info.as_ref().and_then(|c| c.name.as_deref()) {
            Some(client) => info!(client, protocol_version = %protocol_version, "Client initialized"),
            None => info!(protocol_version = %protocol_version, "Client initialized"),
        }

        let result = InitializeResult {
            protocol_version,
            server_info: ServerIdentity::current(),
            capabilities: ServerCapabilities::default(),
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle notifications/initialized
    pub fn handle_initialized(&self) -> Result<Value, McpError> {
        info!("Server initialized");
        Ok(json!({}))
    }

    /// Handle tools/list request
    pub fn handle_tools_list(&self) -> Result<Value, McpError> {
        Ok(json!({ "tools": self.tool_registry.list() }))
    }

    /// Handle tools/call request
    pub async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: ToolCallParams = match params {
            None | Some(Value::Null) => ToolCallParams::default(),
            Some(value @ Value::Object(_)) => serde_json::from_value(value)
                .map_err(|e| McpError::invalid_params(format!("Invalid params: {e}")))?,
            Some(other) => {
                return Err(McpError::InvalidParams {
                    message: "Invalid params: expected object.".to_string(),
                    data: Some(json!({ "params_type": json_type_name(&other) })),
                })
            }
        };

        let arguments = resolve_arguments(params.arguments.clone())?;

        let name = params.display_name();
        let handler = self
            .tool_registry
            .get(params.name.as_ref().and_then(Value::as_str).unwrap_or_default())
            .ok_or_else(|| McpError::invalid_params(format!("Unknown tool: {name}")))?;

        let result = handler.execute(arguments).await?;
        Ok(serde_json::to_value(result)?)
    }
}

/// Check the JSON-RPC envelope; `None` means `Invalid Request`
fn parse_envelope(message: &Value) -> Option<JsonRpcRequest> {
    let object = message.as_object()?;

    if object.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return None;
    }

    let method = object
        .get("method")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())?;

    Some(JsonRpcRequest {
        jsonrpc: JSONRPC_VERSION.to_string(),
        id: object.get("id").cloned(),
        method: method.to_string(),
        params: object.get("params").cloned(),
    })
}

/// Resolve `arguments` to an object, decoding the string form
pub fn resolve_arguments(arguments: Option<CallArguments>) -> Result<Map<String, Value>, McpError> {
    let value = match arguments {
        None => return Ok(Map::new()),
        Some(CallArguments::Object(map)) => return Ok(map),
        Some(CallArguments::Encoded(raw)) => match serde_json::from_str::<Value>(&raw) {
            Ok(decoded) => decoded,
            Err(_) => {
                return Err(McpError::InvalidParams {
                    message: "Invalid arguments: string payload is not valid JSON.".to_string(),
                    data: Some(json!({ "arguments": raw })),
                })
            }
        },
        Some(CallArguments::Other(value)) => value,
    };

    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(McpError::InvalidParams {
            message: "Invalid arguments: expected object.".to_string(),
            data: Some(json!({ "arguments_type": json_type_name(&other) })),
        }),
    }
}
