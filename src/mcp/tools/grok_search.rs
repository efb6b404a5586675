//! `grok_search` tool handler
//!
//! Validates the query, hands it to the configured search backend and
//! wraps the outcome as a text content block. A failed search is still a
//! successful tool call: it is signalled through `isError`.

use super::handler::{text_content, McpToolHandler};
use crate::core::bridge::SearchBackend;
use crate::mcp::error::McpError;
use crate::mcp::protocol::{ToolResult, ToolSchema};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::info;

pub const TOOL_NAME: &str = "grok_search";

/// Process-wide tool descriptor
pub static GROK_SEARCH_TOOL: Lazy<ToolSchema> = Lazy::new(|| ToolSchema {
    name: TOOL_NAME.to_string(),
    description: "Search the web or X using Grok's real-time search capability.".to_string(),
    input_schema: json!({
        "type": "object",
        "properties": {
            "query": {"type": "string", "description": "Search query / research task."}
        },
        "required": ["query"],
        "additionalProperties": false
    }),
});

pub struct GrokSearchHandler {
    backend: Arc<dyn SearchBackend>,
}

impl GrokSearchHandler {
    pub fn new(backend: Arc<dyn SearchBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl McpToolHandler for GrokSearchHandler {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn schema(&self) -> ToolSchema {
        GROK_SEARCH_TOOL.clone()
    }

    async fn execute(&self, args: Map<String, Value>) -> Result<ToolResult, McpError> {
        let query = args
            .get("query")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| McpError::invalid_params("Missing required argument: query"))?;

        info!(
            backend = self.backend.name(),
            query_chars = query.chars().count(),
            "Running grok_search"
        );

        let outcome = self.backend.search(query).await;
        let text = serde_json::to_string_pretty(&outcome)?;

        Ok(text_content(text, !outcome.ok))
    }
}
