//! MCP protocol unit tests

#[cfg(test)]
mod tests {
    use grok_search_mcp::core::types::ServerIdentity;
    use grok_search_mcp::mcp::protocol::*;
    use grok_search_mcp::mcp::tools::GROK_SEARCH_TOOL;
    use serde_json::json;

    #[test]
    fn test_parse_initialize_request() {
        let json = r#"{
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2025-03-26",
                "capabilities": {"tools": {}},
                "clientInfo": {"name": "test", "version": "1.0"}
            }
        }"#;

        let req: JsonRpcRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.method, "initialize");
        assert_eq!(req.id, Some(json!(1)));

        let params: InitializeParams = serde_json::from_value(req.params.unwrap()).unwrap();
        assert_eq!(params.protocol_version.as_deref(), Some("2025-03-26"));
        assert_eq!(params.client_info.unwrap().name.as_deref(), Some("test"));
    }

    #[test]
    fn test_initialize_params_tolerate_partial_client_info() {
        let params: InitializeParams = serde_json::from_value(json!({
            "protocolVersion": "2024-11-05",
            "clientInfo": {}
        }))
        .unwrap();
        assert_eq!(params.protocol_version.as_deref(), Some("2024-11-05"));
    }

    #[test]
    fn test_serialize_initialize_result() {
        let result = InitializeResult {
            protocol_version: DEFAULT_PROTOCOL_VERSION.to_string(),
            server_info: ServerIdentity::current(),
            capabilities: ServerCapabilities::default(),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["protocolVersion"], "2024-11-05");
        assert_eq!(json["serverInfo"]["name"], "grok-search-mcp");
        assert_eq!(json["serverInfo"]["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(json["capabilities"], json!({"tools": {}}));
    }

    #[test]
    fn test_error_response_shape() {
        let response = JsonRpcResponse::failure(
            json!("abc"),
            JsonRpcError {
                code: METHOD_NOT_FOUND,
                message: "Method not found: nope".to_string(),
                data: None,
            },
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            json!({
                "jsonrpc": "2.0",
                "id": "abc",
                "error": {"code": -32601, "message": "Method not found: nope"}
            })
        );
    }

    #[test]
    fn test_success_response_has_no_error_key() {
        let response = JsonRpcResponse::success(json!(null), json!({}));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["id"], json!(null));
    }

    #[test]
    fn test_tool_definition_wire_format() {
        let json = serde_json::to_value(&*GROK_SEARCH_TOOL).unwrap();
        assert_eq!(json["name"], "grok_search");
        assert_eq!(
            json["description"],
            "Search the web or X using Grok's real-time search capability."
        );
        assert_eq!(json["inputSchema"]["type"], "object");
        assert_eq!(
            json["inputSchema"]["properties"]["query"]["description"],
            "Search query / research task."
        );
    }
}
