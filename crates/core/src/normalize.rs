//! Extraction of display text from heterogeneous generative-AI payloads.
//!
//! Different providers (and different generations of the same provider's
//! API) wrap their text in different envelopes. The upstream summary proxy
//! forwards whatever the provider returned, so the shape is not
//! contractually fixed. [`extract_model_text`] tries each known shape as a
//! fallible parse, in priority order, and degrades to a generic tree walk
//! and finally to raw JSON serialization. It never fails.

use serde_json::Value;

/// Maximum object-graph depth visited by the generic fallback walk.
const WALK_DEPTH: usize = 3;

/// Separator between independent text fragments.
const FRAGMENT_SEP: &str = "\n\n";

/// Produce a single display string from an arbitrary provider payload.
///
/// Shape parsers are tried in priority order; the first one that yields
/// text wins:
///
/// 1. a bare JSON string;
/// 2. a top-level `summary`, `text`, or `output_text` string field;
/// 3. a `output` array ("responses" shape) — nested fragments joined by
///    blank lines;
/// 4. a `candidates` array — nested fragments from the first candidate,
///    falling back to its `outputText` / `content` / `message` fields;
/// 5. a `choices` array (legacy chat-completion shape) — first choice's
///    `text` or `message`;
/// 6. a depth-limited walk collecting every scalar leaf in document order;
/// 7. the JSON serialization of the whole payload.
pub fn extract_model_text(payload: &Value) -> String {
    try_plain_string(payload)
        .or_else(|| try_flat_field(payload))
        .or_else(|| try_output_array(payload))
        .or_else(|| try_candidates(payload))
        .or_else(|| try_choices(payload))
        .or_else(|| try_tree_walk(payload))
        .unwrap_or_else(|| payload.to_string())
}

/// Shape 1: the payload is already a string.
fn try_plain_string(payload: &Value) -> Option<String> {
    payload.as_str().map(str::to_owned)
}

/// Shape 2: a well-known top-level string field.
fn try_flat_field(payload: &Value) -> Option<String> {
    ["summary", "text", "output_text"]
        .iter()
        .find_map(|key| payload.get(key).and_then(Value::as_str))
        .map(str::to_owned)
}

/// Shape 3: an `output` array of elements carrying `content` fragment
/// lists (or their own `text` field).
fn try_output_array(payload: &Value) -> Option<String> {
    let output = payload.get("output")?.as_array()?;
    let mut fragments = Vec::new();
    for element in output {
        collect_fragments(element, &mut fragments);
    }
    joined_or_none(fragments)
}

/// Shape 4: a `candidates` array. Only the first candidate is examined.
fn try_candidates(payload: &Value) -> Option<String> {
    let candidate = payload.get("candidates")?.as_array()?.first()?;

    let mut fragments = Vec::new();
    if let Some(nested) = candidate.get("output").or_else(|| candidate.get("content")) {
        collect_fragments(nested, &mut fragments);
    }
    if let Some(text) = joined_or_none(fragments) {
        return Some(text);
    }

    ["outputText", "content", "message"]
        .iter()
        .find_map(|key| candidate.get(key).and_then(Value::as_str))
        .map(str::to_owned)
}

/// Shape 5: a `choices` array. Only the first choice is examined.
fn try_choices(payload: &Value) -> Option<String> {
    let choice = payload.get("choices")?.as_array()?.first()?;

    if let Some(text) = choice.get("text").and_then(Value::as_str) {
        return Some(text.to_owned());
    }

    let message = choice.get("message")?;
    if let Some(text) = message.as_str() {
        return Some(text.to_owned());
    }
    match message.get("content")? {
        Value::String(text) => Some(text.clone()),
        // Multi-part content: keep string parts and nested `text` fields.
        Value::Array(parts) => {
            let lines: Vec<String> = parts
                .iter()
                .filter_map(|part| {
                    part.as_str()
                        .or_else(|| part.get("text").and_then(Value::as_str))
                        .map(str::to_owned)
                })
                .collect();
            if lines.is_empty() {
                None
            } else {
                Some(lines.join("\n"))
            }
        }
        _ => None,
    }
}

/// Shape 6: collect every string/number/boolean leaf reachable within
/// [`WALK_DEPTH`] levels, in document order.
fn try_tree_walk(payload: &Value) -> Option<String> {
    let mut leaves = Vec::new();
    walk(payload, 0, &mut leaves);
    joined_or_none(leaves)
}

fn walk(value: &Value, depth: usize, out: &mut Vec<String>) {
    match value {
        Value::String(s) => out.push(s.clone()),
        Value::Number(n) => out.push(n.to_string()),
        Value::Bool(b) => out.push(b.to_string()),
        Value::Array(items) if depth < WALK_DEPTH => {
            for item in items {
                walk(item, depth + 1, out);
            }
        }
        Value::Object(map) if depth < WALK_DEPTH => {
            for (_, item) in map {
                walk(item, depth + 1, out);
            }
        }
        _ => {}
    }
}

/// Pull text fragments from a "responses"-style element: either a
/// `content` array of `{ text }` parts, or the element's own `text` field.
/// Bare arrays and bare strings are accepted as well.
fn collect_fragments(element: &Value, out: &mut Vec<String>) {
    match element {
        Value::String(s) => out.push(s.clone()),
        Value::Array(items) => {
            for item in items {
                collect_fragments(item, out);
            }
        }
        Value::Object(_) => {
            if let Some(content) = element.get("content") {
                collect_fragments(content, out);
            } else if let Some(text) = element.get("text").and_then(Value::as_str) {
                out.push(text.to_owned());
            }
        }
        _ => {}
    }
}

fn joined_or_none(fragments: Vec<String>) -> Option<String> {
    if fragments.is_empty() {
        None
    } else {
        Some(fragments.join(FRAGMENT_SEP))
    }
}
