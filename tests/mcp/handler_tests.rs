//! MCP handler tests

#[cfg(test)]
mod tests {
    use crate::common::{create_test_handlers, tool_call, MockBackend};
    use grok_search_mcp::core::error::SearchError;
    use grok_search_mcp::core::types::SearchOutcome;
    use serde_json::{json, Value};

    fn tool_text(response: &Value) -> Value {
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_default_version() {
        let handlers = create_test_handlers(MockBackend::paris());

        let response = handlers
            .dispatch(json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}))
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "grok-search-mcp");
        assert_eq!(result["capabilities"], json!({"tools": {}}));
    }

    #[tokio::test]
    async fn test_initialize_echoes_version() {
        let handlers = create_test_handlers(MockBackend::paris());

        let response = handlers
            .dispatch(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {"protocolVersion": "2025-06-18"}
            }))
            .await
            .unwrap();

        assert_eq!(response.result.unwrap()["protocolVersion"], "2025-06-18");
    }

    #[tokio::test]
    async fn test_initialize_ignores_empty_version() {
        let handlers = create_test_handlers(MockBackend::paris());

        let response = handlers
            .dispatch(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {"protocolVersion": ""}
            }))
            .await
            .unwrap();

        assert_eq!(response.result.unwrap()["protocolVersion"], "2024-11-05");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let handlers = create_test_handlers(MockBackend::paris());

        let response = handlers
            .dispatch(json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"}))
            .await
            .unwrap();

        let tools = response.result.unwrap()["tools"].clone();
        assert_eq!(tools.as_array().unwrap().len(), 1);
        assert_eq!(tools[0]["name"], "grok_search");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["query"]));
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let backend = MockBackend::paris();
        let handlers = create_test_handlers(backend.clone());

        let response = handlers
            .dispatch(tool_call(3, json!({"query": "capital of France"})))
            .await
            .unwrap();

        assert!(response.error.is_none());
        assert_eq!(response.id, json!(3));
        assert_eq!(response.result.as_ref().unwrap()["isError"], false);
        assert_eq!(
            response.result.as_ref().unwrap()["content"][0]["type"],
            "text"
        );

        let outcome = tool_text(&serde_json::to_value(&response).unwrap());
        assert_eq!(outcome["ok"], true);
        assert_eq!(outcome["content"], "Paris");
        assert_eq!(
            outcome["sources"][0]["url"],
            "https://en.wikipedia.org/wiki/Paris"
        );
        assert_eq!(backend.queries(), vec!["capital of France".to_string()]);
    }

    #[tokio::test]
    async fn test_tools_call_string_arguments_match_object() {
        let backend = MockBackend::paris();
        let handlers = create_test_handlers(backend.clone());

        let object_form = handlers
            .dispatch(tool_call(1, json!({"query": "x"})))
            .await
            .unwrap();
        let string_form = handlers
            .dispatch(tool_call(1, json!("{\"query\":\"x\"}")))
            .await
            .unwrap();

        assert_eq!(object_form, string_form);
        assert_eq!(backend.queries(), vec!["x".to_string(), "x".to_string()]);
    }

    #[tokio::test]
    async fn test_tools_call_trims_query() {
        let backend = MockBackend::paris();
        let handlers = create_test_handlers(backend.clone());

        handlers
            .dispatch(tool_call(1, json!({"query": "  padded  "})))
            .await
            .unwrap();

        assert_eq!(backend.queries(), vec!["padded".to_string()]);
    }

    #[tokio::test]
    async fn test_tools_call_failure_sets_is_error() {
        let backend = MockBackend::new(SearchOutcome::failure(SearchError::Http {
            status: 500,
            detail: "boom".to_string(),
        }));
        let handlers = create_test_handlers(backend);

        let response = handlers
            .dispatch(tool_call(4, json!({"query": "q"})))
            .await
            .unwrap();

        // Tool failures are successful JSON-RPC responses
        assert!(response.error.is_none());
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["result"]["isError"], true);

        let outcome = tool_text(&json);
        assert_eq!(outcome["ok"], false);
        assert_eq!(outcome["error"], "http_error");
        assert_eq!(outcome["status_code"], 500);
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool() {
        let backend = MockBackend::paris();
        let handlers = create_test_handlers(backend.clone());

        let response = handlers
            .dispatch(json!({
                "jsonrpc": "2.0",
                "id": 5,
                "method": "tools/call",
                "params": {"name": "web_search", "arguments": {"query": "q"}}
            }))
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.message, "Unknown tool: web_search");
        assert!(backend.queries().is_empty());
    }

    #[tokio::test]
    async fn test_tools_call_missing_query() {
        let backend = MockBackend::paris();
        let handlers = create_test_handlers(backend.clone());

        for arguments in [json!({}), json!({"query": "   "}), json!(null)] {
            let response = handlers.dispatch(tool_call(6, arguments)).await.unwrap();
            let error = response.error.unwrap();
            assert_eq!(error.code, -32602);
            assert_eq!(error.message, "Missing required argument: query");
        }
        assert!(backend.queries().is_empty());
    }

    #[tokio::test]
    async fn test_tools_call_invalid_string_arguments() {
        let handlers = create_test_handlers(MockBackend::paris());

        let response = handlers
            .dispatch(tool_call(7, json!("{not json")))
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(
            error.message,
            "Invalid arguments: string payload is not valid JSON."
        );
        assert_eq!(error.data, Some(json!({"arguments": "{not json"})));
    }

    #[tokio::test]
    async fn test_tools_call_non_object_arguments() {
        let handlers = create_test_handlers(MockBackend::paris());

        let response = handlers
            .dispatch(tool_call(8, json!(["query"])))
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, -32602);
        assert_eq!(error.message, "Invalid arguments: expected object.");
        assert_eq!(error.data, Some(json!({"arguments_type": "array"})));
    }

    #[tokio::test]
    async fn test_arguments_checked_before_tool_name() {
        let handlers = create_test_handlers(MockBackend::paris());

        let response = handlers
            .dispatch(json!({
                "jsonrpc": "2.0",
                "id": 9,
                "method": "tools/call",
                "params": {"name": "other", "arguments": 42}
            }))
            .await
            .unwrap();

        assert_eq!(
            response.error.unwrap().message,
            "Invalid arguments: expected object."
        );
    }

    #[tokio::test]
    async fn test_tools_call_params_must_be_object() {
        let handlers = create_test_handlers(MockBackend::paris());

        let response = handlers
            .dispatch(json!({"jsonrpc": "2.0", "id": 10, "method": "tools/call", "params": [1]}))
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let handlers = create_test_handlers(MockBackend::paris());

        let response = handlers
            .dispatch(json!({"jsonrpc": "2.0", "id": 11, "method": "resources/list"}))
            .await
            .unwrap();

        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert_eq!(error.message, "Method not found: resources/list");
    }

    #[tokio::test]
    async fn test_ping_and_initialized() {
        let handlers = create_test_handlers(MockBackend::paris());

        let ping = handlers
            .dispatch(json!({"jsonrpc": "2.0", "id": 12, "method": "ping"}))
            .await
            .unwrap();
        assert_eq!(ping.result, Some(json!({})));

        let initialized = handlers
            .dispatch(json!({"jsonrpc": "2.0", "id": 13, "method": "notifications/initialized"}))
            .await
            .unwrap();
        assert_eq!(initialized.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let backend = MockBackend::paris();
        let handlers = create_test_handlers(backend.clone());

        let none = handlers
            .dispatch(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await;
        assert!(none.is_none());

        // Unknown methods sent as notifications are silent too
        let none = handlers
            .dispatch(json!({"jsonrpc": "2.0", "method": "nope"}))
            .await;
        assert!(none.is_none());

        // A tool call notification still runs
        let none = handlers
            .dispatch(json!({
                "jsonrpc": "2.0",
                "method": "tools/call",
                "params": {"name": "grok_search", "arguments": {"query": "q"}}
            }))
            .await;
        assert!(none.is_none());
        assert_eq!(backend.queries(), vec!["q".to_string()]);
    }

    #[tokio::test]
    async fn test_null_id_is_answered() {
        let handlers = create_test_handlers(MockBackend::paris());

        let response = handlers
            .dispatch(json!({"jsonrpc": "2.0", "id": null, "method": "ping"}))
            .await
            .unwrap();

        assert_eq!(response.id, Value::Null);
        assert_eq!(response.result, Some(json!({})));
    }

    #[tokio::test]
    async fn test_invalid_envelope() {
        let handlers = create_test_handlers(MockBackend::paris());

        let message = json!({"jsonrpc": "1.0", "id": 14, "method": "ping"});
        let response = handlers.dispatch(message.clone()).await.unwrap();

        let error = response.error.unwrap();
        assert_eq!(response.id, json!(14));
        assert_eq!(error.code, -32600);
        assert_eq!(error.message, "Invalid Request");
        assert_eq!(error.data, Some(message));
    }

    #[tokio::test]
    async fn test_invalid_envelope_without_id_is_answered() {
        let handlers = create_test_handlers(MockBackend::paris());

        let response = handlers
            .dispatch(json!({"jsonrpc": "2.0", "method": ""}))
            .await
            .unwrap();

        assert_eq!(response.id, Value::Null);
        assert_eq!(response.error.unwrap().code, -32600);
    }
}
