//! JSON utilities for pulling structured payloads out of model replies

use serde_json::{Map, Value};

/// Extract JSON content from markdown code blocks or raw text
///
/// Handles:
/// - ```json blocks
/// - Generic ``` blocks
/// - Raw JSON, possibly surrounded by prose
pub fn extract_json(text: &str) -> String {
    if let Some(body) = fenced(text, "```json") {
        return body;
    }
    if let Some(body) = fenced(text, "```") {
        return body;
    }

    let trimmed = text.trim();
    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => trimmed[start..=end].to_string(),
        _ => trimmed.to_string(),
    }
}

/// Body between `opening` and the last closing fence
///
/// The rest of the opening line (a language tag such as `javascript`) is not
/// part of the body.
fn fenced(text: &str, opening: &str) -> Option<String> {
    let mut start = text.find(opening)? + opening.len();
    let line_end = text[start..]
        .find('\n')
        .map(|pos| pos + start)
        .unwrap_or(text.len());
    if is_language_tag(&text[start..line_end]) {
        start = (line_end + 1).min(text.len());
    }
    let end = text[start..]
        .rfind("```")
        .map(|pos| pos + start)
        .unwrap_or(text.len());
    Some(text[start..end].trim().to_string())
}

fn is_language_tag(rest_of_line: &str) -> bool {
    rest_of_line
        .trim()
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '+' | '.'))
}

/// Parse a reply into a JSON object, if it contains one
///
/// Anything other than an object (arrays, scalars, invalid text) yields
/// `None`.
pub fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(&extract_json(text)) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}
