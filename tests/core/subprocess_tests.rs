//! Helper process bridge tests
//!
//! Uses `sh -c` scripts as the helper so no executable files are written.

#[cfg(all(test, unix))]
mod tests {
    use grok_search_mcp::core::bridge::{SearchBackend, SubprocessSearch};
    use std::path::PathBuf;
    use std::time::{Duration, Instant};

    fn script(body: &str) -> SubprocessSearch {
        SubprocessSearch::new(
            "sh",
            vec!["-c".to_string(), body.to_string(), "sh".to_string()],
        )
    }

    #[tokio::test]
    async fn test_json_output_passed_through() {
        let backend = script(
            r#"echo '{"ok": true, "content": "from helper", "sources": [], "model": "grok-x"}'"#,
        );

        let outcome = backend.search("q").await;

        assert!(outcome.ok);
        assert_eq!(outcome.content.as_deref(), Some("from helper"));
        // Unknown keys survive the round trip
        assert_eq!(outcome.extra.get("model"), Some(&serde_json::json!("grok-x")));
    }

    #[tokio::test]
    async fn test_mistyped_known_keys_kept_as_printed() {
        let backend = script(
            r#"echo '{"ok": true, "content": "c", "status_code": "200", "sources": [{"url": "u", "date": "2024"}]}'"#,
        );

        let outcome = backend.search("q").await;

        assert!(outcome.ok);
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({
                "ok": true,
                "content": "c",
                "status_code": "200",
                "sources": [{"url": "u", "date": "2024"}]
            })
        );
    }

    #[tokio::test]
    async fn test_query_and_config_forwarded() {
        // $1.. are the helper arguments: --query <q> --config <path>
        let backend = script(r#"printf '{"ok": true, "content": "%s|%s|%s|%s"}' "$1" "$2" "$3" "$4""#)
            .with_config_path(Some(PathBuf::from("/tmp/grok.json")));

        let outcome = backend.search("two words").await;
        assert_eq!(
            outcome.content.as_deref(),
            Some("--query|two words|--config|/tmp/grok.json")
        );
    }

    #[tokio::test]
    async fn test_failed_helper_outcome_kept() {
        let backend = script(r#"echo '{"ok": false, "error": "missing_api_key", "detail": "x"}'; exit 1"#);

        let outcome = backend.search("q").await;
        assert!(!outcome.ok);
        assert_eq!(outcome.error_kind(), Some("missing_api_key"));
    }

    #[tokio::test]
    async fn test_empty_output() {
        let backend = script("echo 'boom' >&2; exit 3");

        let outcome = backend.search("q").await;

        assert!(!outcome.ok);
        assert_eq!(outcome.error_kind(), Some("empty_output"));
        assert_eq!(outcome.returncode, Some(3));
        assert_eq!(outcome.raw_stderr.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn test_non_json_output() {
        let backend = script("echo 'Traceback: something broke'; echo warn >&2; exit 1");

        let outcome = backend.search("q").await;

        assert_eq!(outcome.error_kind(), Some("non_json_output"));
        assert_eq!(
            outcome.raw_stdout.as_deref(),
            Some("Traceback: something broke")
        );
        assert_eq!(outcome.raw_stderr.as_deref(), Some("warn"));
        assert_eq!(outcome.returncode, Some(1));
    }

    #[tokio::test]
    async fn test_json_array_output_is_non_json() {
        let backend = script("echo '[1, 2]'");

        let outcome = backend.search("q").await;
        assert_eq!(outcome.error_kind(), Some("non_json_output"));
    }

    #[tokio::test]
    async fn test_timeout_kills_helper() {
        let backend = script("sleep 10").with_timeout(Duration::from_millis(200));

        let started = Instant::now();
        let outcome = backend.search("q").await;

        assert_eq!(outcome.error_kind(), Some("timeout"));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_missing_helper() {
        let backend = SubprocessSearch::new("/nonexistent/grok-search-helper", Vec::new());

        let outcome = backend.search("q").await;

        assert_eq!(outcome.error_kind(), Some("script_not_found"));
        assert_eq!(
            outcome.path.as_deref(),
            Some("/nonexistent/grok-search-helper")
        );
    }
}
