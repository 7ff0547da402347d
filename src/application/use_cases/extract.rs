//! Tolerant extraction of the generated JSON payload from the provider's
//! response envelope.
//!
//! The envelope shape is not contractually stable: depending on provider
//! version the payload arrives pre-parsed at the top level, nested inside
//! message content blocks (parsed or as raw text), or flattened into a
//! convenience text field. Candidates are tried in that order so a provider
//! upgrade does not require a deploy here.

use serde_json::Value;

/// Locate and parse the generated object inside `envelope`.
/// Returns `None` when no candidate yields a JSON object.
pub fn extract_payload(envelope: &Value) -> Option<Value> {
    // Pre-parsed top-level field, newest envelope shape.
    if let Some(parsed) = envelope.get("output_parsed") {
        if parsed.is_object() {
            return Some(parsed.clone());
        }
    }

    // Message items carrying content blocks, each with a parsed object
    // or raw text.
    if let Some(items) = envelope.get("output").and_then(Value::as_array) {
        for item in items {
            let Some(blocks) = item.get("content").and_then(Value::as_array) else {
                continue;
            };
            for block in blocks {
                if let Some(parsed) = block.get("parsed") {
                    if parsed.is_object() {
                        return Some(parsed.clone());
                    }
                }
                if let Some(text) = block.get("text").and_then(Value::as_str) {
                    if let Some(value) = parse_object(text) {
                        return Some(value);
                    }
                }
            }
        }
    }

    // Flattened convenience text, oldest shape.
    if let Some(text) = envelope.get("output_text").and_then(Value::as_str) {
        if let Some(value) = parse_object(text) {
            return Some(value);
        }
    }

    None
}

/// Whole-string parse first; on failure, greedy anchored extraction from the
/// first `{` to the last `}` and a reparse.
fn parse_object(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if value.is_object() {
            return Some(value);
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }

    serde_json::from_str::<Value>(&text[start..=end])
        .ok()
        .filter(|v| v.is_object())
}
