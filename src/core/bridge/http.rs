//! Direct chat-completion call
//!
//! Builds the request from [`Settings`], sends it under a hard wall-clock
//! timeout and normalizes the reply. The HTTP client lives only for the
//! duration of one call.

use crate::core::error::{safe_truncate, SearchError};
use crate::core::settings::Settings;
use crate::core::types::SearchOutcome;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

/// Upstream bodies are cut to this many characters in error details
pub const DETAIL_LIMIT: usize = 400;

/// Derive the chat-completion endpoint from a base URL
///
/// `https://api.x.ai` and `https://api.x.ai/v1/` both map to
/// `https://api.x.ai/v1/chat/completions`.
pub fn build_endpoint(base_url: &str) -> String {
    let cleaned = base_url.trim_end_matches('/');
    if cleaned.ends_with("/v1") {
        format!("{cleaned}/chat/completions")
    } else {
        format!("{cleaned}/v1/chat/completions")
    }
}

/// Request body; `extra_body` keys win over the base payload
pub fn build_payload(query: &str, settings: &Settings) -> Value {
    let mut payload = json!({
        "model": settings.model,
        "messages": [
            {"role": "system", "content": settings.system_prompt},
            {"role": "user", "content": query},
        ],
        "temperature": 0,
        "stream": false,
    });

    if let Value::Object(fields) = &mut payload {
        fields.extend(settings.extra_body.clone());
    }

    payload
}

/// Request headers; `extra_headers` win over the defaults
pub fn build_headers(settings: &Settings) -> Result<HeaderMap, SearchError> {
    let mut headers = HeaderMap::new();

    let bearer = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
        .map_err(|e| SearchError::Network(format!("Invalid API key header: {e}")))?;
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in &settings.extra_headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SearchError::Network(format!("Invalid header name '{name}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| SearchError::Network(format!("Invalid value for header '{name}': {e}")))?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Run one search against the chat-completion endpoint
///
/// Never fails: errors come back as an outcome with `ok: false`.
pub async fn invoke(query: &str, settings: &Settings) -> SearchOutcome {
    match call_chat_completion(query, settings).await {
        Ok(outcome) => outcome,
        Err(e) => SearchOutcome::failure(e),
    }
}

async fn call_chat_completion(
    query: &str,
    settings: &Settings,
) -> Result<SearchOutcome, SearchError> {
    let endpoint = build_endpoint(&settings.base_url);
    let headers = build_headers(settings)?;
    let body = serde_json::to_vec(&build_payload(query, settings))
        .map_err(|e| SearchError::Unexpected(format!("Failed to encode request: {e}")))?;
    let timeout = settings.timeout();

    info!(
        endpoint = %endpoint,
        model = %settings.model,
        timeout_secs = settings.timeout_seconds,
        "Calling chat completion"
    );

    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SearchError::Network(format!("Failed to create HTTP client: {e}")))?;

    let exchange = async {
        let response = client
            .post(&endpoint)
            .headers(headers)
            .body(body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        Ok::<_, reqwest::Error>((status, text))
    };

    let (status, text) = match tokio::time::timeout(timeout, exchange).await {
        Ok(Ok(reply)) => reply,
        Ok(Err(e)) => return Err(classify_transport_error(e)),
        Err(_) => {
            return Err(SearchError::Timeout(format!(
                "No response from {endpoint} within {:.1}s",
                settings.timeout_seconds
            )))
        }
    };

    debug!(status = status.as_u16(), bytes = text.len(), "Upstream replied");

    if status.as_u16() >= 400 {
        let detail = safe_truncate(text.trim(), DETAIL_LIMIT);
        return Err(SearchError::Http {
            status: status.as_u16(),
            detail: if detail.is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                detail
            },
        });
    }

    let raw: Value = serde_json::from_str(&text)
        .map_err(|_| SearchError::InvalidJsonResponse(safe_truncate(&text, DETAIL_LIMIT)))?;

    Ok(SearchOutcome::success(raw))
}

fn classify_transport_error(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::Timeout(err.to_string())
    } else {
        SearchError::Network(err.to_string())
    }
}
