//! MCP-specific error types

use crate::mcp::protocol::{
    JsonRpcError, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND,
};
use serde_json::Value;
use thiserror::Error;

/// Protocol-level failure, answered as a JSON-RPC `error`
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Invalid Request")]
    InvalidRequest(Value),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("{message}")]
    InvalidParams {
        message: String,
        data: Option<Value>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// Invalid params without extra data
    pub fn invalid_params(message: impl Into<String>) -> Self {
        McpError::InvalidParams {
            message: message.into(),
            data: None,
        }
    }

    /// JSON-RPC error code for this failure
    pub fn code(&self) -> i32 {
        match self {
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams { .. } => INVALID_PARAMS,
            McpError::Io(_) | McpError::Json(_) => INTERNAL_ERROR,
        }
    }

    /// Convert into the wire error object
    pub fn into_rpc_error(self) -> JsonRpcError {
        let code = self.code();
        let message = self.to_string();
        let data = match self {
            McpError::InvalidRequest(data) => Some(data),
            McpError::InvalidParams { data, .. } => data,
            _ => None,
        };

        JsonRpcError {
            code,
            message,
            data,
        }
    }
}
