//! MCP server implementation (stdio)

use crate::core::services::Services;
use crate::mcp::error::McpError;
use crate::mcp::handlers::ProtocolHandlers;
use crate::mcp::transport::StdioTransport;
use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, BufReader};
use tracing::{debug, info, warn};

pub struct McpServer {
    handlers: Arc<ProtocolHandlers>,
}

impl McpServer {
    pub fn new(services: Arc<Services>) -> Self {
        Self {
            handlers: Arc::new(ProtocolHandlers::new(services)),
        }
    }

    /// Run the MCP server on stdin/stdout until EOF or Ctrl+C
    pub async fn run(&self) -> Result<(), McpError> {
        info!("Starting grok-search MCP server (stdio)");

        let stdin = BufReader::new(tokio::io::stdin());
        let mut transport = StdioTransport::new();

        tokio::select! {
            result = self.serve(stdin, &mut transport) => result?,

            // Handle Ctrl+C
            _ = tokio::signal::ctrl_c() => {
                info!("Received shutdown signal");
            }
        }

        info!("MCP server shutting down");
        Ok(())
    }

    /// Serve line-delimited payloads from `reader` until EOF
    ///
    /// Lines are decoded lossily, so invalid UTF-8 is answered like any
    /// other unparseable line instead of ending the session.
    pub async fn serve<R, W>(
        &self,
        mut reader: R,
        transport: &mut StdioTransport<W>,
    ) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            debug!("Received: {}", line);

            let payload = serde_json::from_str::<Value>(line).unwrap_or_else(|e| {
                warn!("Unparseable payload: {}", e);
                Value::Null
            });

            if let Some(reply) = self.handlers.handle_payload(payload).await {
                transport.send_reply(&reply).await?;
            }
        }

        Ok(())
    }
}
