//! Response normalizer tests

#[cfg(test)]
mod tests {
    use grok_search_mcp::core::normalize::{extract_message_text, extract_sources, normalize};
    use serde_json::json;

    #[test]
    fn test_plain_content_trimmed() {
        let payload = json!({"choices": [{"message": {"content": "  hi  "}}]});
        assert_eq!(extract_message_text(&payload), "hi");
    }

    #[test]
    fn test_content_parts_joined() {
        let payload = json!({"choices": [{"message": {"content": [
            {"type": "text", "text": "a"},
            {"type": "image_url", "image_url": {"url": "http://img"}},
            {"type": "text", "text": "  "},
            {"type": "text", "text": "b"}
        ]}}]});
        assert_eq!(extract_message_text(&payload), "a\nb");
    }

    #[test]
    fn test_fallback_to_whole_payload() {
        let payload = json!({"id": "cmpl-1", "note": "résumé"});
        let text = extract_message_text(&payload);

        assert_eq!(serde_json::from_str::<serde_json::Value>(&text).unwrap(), payload);
        assert!(text.contains("résumé"));
    }

    #[test]
    fn test_blank_content_is_empty_not_fallback() {
        let payload = json!({"choices": [{"message": {"content": "   "}}]});
        assert_eq!(extract_message_text(&payload), "");

        let payload = json!({"choices": [{"message": {"content": [{"type": "image_url"}]}}]});
        assert_eq!(extract_message_text(&payload), "");
    }

    #[test]
    fn test_unrecognized_content_falls_back() {
        let payload = json!({"choices": [{"message": {"content": 42}}]});
        assert_eq!(extract_message_text(&payload), payload.to_string());
    }

    #[test]
    fn test_sources_from_strings_and_objects() {
        let payload = json!({"choices": [{"message": {
            "content": "x",
            "citations": ["http://x", {"href": "http://y", "name": "Y"}, {}, 5, "  "]
        }}]});

        let sources = serde_json::to_value(extract_sources(&payload)).unwrap();
        assert_eq!(
            sources,
            json!([{"url": "http://x"}, {"url": "http://y", "title": "Y"}])
        );
    }

    #[test]
    fn test_sources_empty_object_only() {
        let payload = json!({"choices": [{"message": {"citations": [{}]}}]});
        assert!(extract_sources(&payload).is_empty());
    }

    #[test]
    fn test_sources_first_non_empty_list_wins() {
        let payload = json!({
            "choices": [{"message": {
                "citations": [],
                "metadata": {"sources": [{"url": "http://meta", "snippet": "s"}]}
            }}],
            "sources": ["http://top"]
        });

        let sources = extract_sources(&payload);
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].url.as_deref(), Some("http://meta"));
        assert_eq!(sources[0].snippet.as_deref(), Some("s"));
    }

    #[test]
    fn test_sources_top_level() {
        let payload = json!({"choices": [], "references": [{"url": "http://ref", "quote": "q"}]});

        let sources = extract_sources(&payload);
        assert_eq!(sources[0].url.as_deref(), Some("http://ref"));
        assert_eq!(sources[0].snippet.as_deref(), Some("q"));
    }

    #[test]
    fn test_normalize_combines() {
        let payload = json!({"choices": [{"message": {"content": "Paris"}}]});
        let normalized = normalize(&payload);

        assert_eq!(normalized.content, "Paris");
        assert!(normalized.sources.is_empty());
    }
}
