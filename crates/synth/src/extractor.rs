use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

use crate::schema::LlmComponentResponse;

/// First fenced block whose body is a JSON object. The object span is lazy, so it
/// stops at the first `}` followed by a closing fence.
static FENCED_JSON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("fenced JSON pattern is valid")
});

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("response does not match schema: {0}")]
    Schema(#[source] serde_json::Error),
}

/// Isolate the JSON candidate from raw model text: the first fenced object if
/// there is one, otherwise the whole text, trimmed and with curly quotes
/// straightened.
pub fn isolate_candidate(content: &str) -> String {
    let candidate = FENCED_JSON
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map_or(content, |m| m.as_str());

    straighten_quotes(candidate.trim())
}

fn is_curly_quote(c: char) -> bool {
    c == '\u{201C}' || c == '\u{201D}'
}

/// Replace U+201C/U+201D with `"`. A curly quote that delimits a string becomes a
/// delimiter; one inside a string value is escaped so the value still parses.
/// Typographic quotes the model meant to keep in the HTML come out straight.
///
/// Inside a value, a curly quote followed by `,` `:` `}` or `]` is read as the
/// closing delimiter, so text like `“Hello”, world` in the HTML still fails to parse.
fn straighten_quotes(candidate: &str) -> String {
    let mut out = String::with_capacity(candidate.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in candidate.char_indices() {
        if escaped {
            escaped = false;
            out.push(if is_curly_quote(c) { '"' } else { c });
            continue;
        }
        match c {
            '\\' if in_string => {
                escaped = true;
                out.push(c);
            }
            '"' => {
                in_string = !in_string;
                out.push(c);
            }
            c if is_curly_quote(c) && !in_string => {
                in_string = true;
                out.push('"');
            }
            c if is_curly_quote(c) && closes_string(&candidate[i + c.len_utf8()..]) => {
                in_string = false;
                out.push('"');
            }
            c if is_curly_quote(c) => out.push_str("\\\""),
            _ => out.push(c),
        }
    }
    out
}

fn closes_string(rest: &str) -> bool {
    matches!(
        rest.trim_start().chars().next(),
        None | Some(':' | ',' | '}' | ']')
    )
}

/// Parse the isolated candidate. A fenced block that fails to parse is final;
/// the rest of the text is not scanned.
pub fn extract_json_payload(content: &str) -> Result<Value, ExtractError> {
    serde_json::from_str(&isolate_candidate(content)).map_err(ExtractError::InvalidJson)
}

/// Recover the component record from model output.
pub fn extract_component(content: &str) -> Result<LlmComponentResponse, ExtractError> {
    let payload = extract_json_payload(content)?;
    serde_json::from_value(payload).map_err(ExtractError::Schema)
}
