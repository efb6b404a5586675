//! Provider reply normalization
//!
//! Chat-completion providers disagree on where they put the assistant text
//! and the citations. Both extractions are driven by ordered strategy
//! tables: each entry pairs a JSON pointer with a validator, and the first
//! entry that yields something wins. Nothing here performs I/O or fails.
//!
//! A recognized content shape wins even when it holds no text. Only when
//! neither shape matches is the whole payload serialized into `content`.

use crate::core::types::SourceEntry;
use serde_json::Value;

/// Assistant text and citations extracted from a provider payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub content: String,
    pub sources: Vec<SourceEntry>,
}

type TextExtractor = fn(&Value) -> Option<String>;
type ListValidator = fn(&Value) -> Option<&[Value]>;

const TEXT_STRATEGIES: &[(&str, TextExtractor)] = &[
    ("/choices/0/message/content", plain_text),
    ("/choices/0/message/content", text_parts),
];

const SOURCE_STRATEGIES: &[(&str, ListValidator)] = &[
    ("/choices/0/message/citations", non_empty_list),
    ("/choices/0/message/sources", non_empty_list),
    ("/choices/0/message/references", non_empty_list),
    ("/choices/0/message/metadata/citations", non_empty_list),
    ("/choices/0/message/metadata/sources", non_empty_list),
    ("/choices/0/message/metadata/references", non_empty_list),
    ("/sources", non_empty_list),
    ("/citations", non_empty_list),
    ("/references", non_empty_list),
];

/// Normalize a raw provider payload into `{content, sources}`
pub fn normalize(payload: &Value) -> Normalized {
    Normalized {
        content: extract_message_text(payload),
        sources: extract_sources(payload),
    }
}

/// Extract the assistant text, falling back to the serialized payload
pub fn extract_message_text(payload: &Value) -> String {
    TEXT_STRATEGIES
        .iter()
        .find_map(|(path, extract)| payload.pointer(path).and_then(extract))
        .unwrap_or_else(|| payload.to_string())
}

/// Extract citations from the first non-empty candidate list
pub fn extract_sources(payload: &Value) -> Vec<SourceEntry> {
    SOURCE_STRATEGIES
        .iter()
        .find_map(|(path, validate)| payload.pointer(path).and_then(validate))
        .map(|items| items.iter().filter_map(SourceEntry::from_value).collect())
        .unwrap_or_default()
}

fn plain_text(content: &Value) -> Option<String> {
    content.as_str().map(|text| text.trim().to_string())
}

fn text_parts(content: &Value) -> Option<String> {
    let parts = content.as_array()?;
    let texts: Vec<&str> = parts
        .iter()
        .filter(|part| part.get("type").and_then(Value::as_str) == Some("text"))
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect();
    Some(texts.join("\n"))
}

fn non_empty_list(value: &Value) -> Option<&[Value]> {
    value
        .as_array()
        .filter(|items| !items.is_empty())
        .map(Vec::as_slice)
}
