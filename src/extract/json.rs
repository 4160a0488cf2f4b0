//! JSON content: verbatim when small, bounded structural summary otherwise.

use super::Extracted;
use crate::domain::Limits;
use crate::utils::{format_size, read_file_lossy};
use serde_json::Value;
use std::path::Path;

/// Strings longer than this are cut in summaries.
const MAX_STRING_CHARS: usize = 60;
/// Scalars collapsed at the depth limit are cut to this many characters.
const MAX_SCALAR_CHARS: usize = 50;
/// Arrays with at most this many scalars render inline.
const INLINE_ARRAY_ITEMS: usize = 3;

pub(crate) fn extract_json(path: &Path, size: u64, limits: &Limits) -> Extracted {
    let text = match read_file_lossy(path) {
        Ok(text) => text,
        Err(err) => return Extracted::read_error(&err),
    };
    if size < limits.json_full_threshold {
        return Extracted::Content(text);
    }

    let value: Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => return Extracted::Error(format!("[JSON parse error: {err}]")),
    };

    let mut out = format!("[JSON file: {}]\n\n", format_size(size));
    out.push_str(&summarize_json(&value, limits.json_max_depth, limits.json_max_items));
    match &value {
        Value::Array(items) => {
            out.push_str(&format!("\n\n# Total items: {}", items.len()));
        }
        Value::Object(map) => {
            let keys = Value::Array(map.keys().cloned().map(Value::String).collect());
            out.push_str(&format!("\n\n# Top-level keys: {keys}"));
        }
        _ => {}
    }
    Extracted::Content(out)
}

/// Depth- and breadth-bounded rendering of a JSON value.
///
/// Objects and arrays show at most `max_items` entries followed by a
/// `... +N more` note; anything nested `max_depth` levels down collapses to
/// a count placeholder.
pub fn summarize_json(value: &Value, max_depth: usize, max_items: usize) -> String {
    summarize(value, max_depth, max_items, 0, "")
}

fn summarize(value: &Value, max_depth: usize, max_items: usize, depth: usize, indent: &str) -> String {
    if depth >= max_depth {
        return match value {
            Value::Object(map) => format!("{{...}} ({} keys)", map.len()),
            Value::Array(items) => format!("[...] ({} items)", items.len()),
            scalar => scalar.to_string().chars().take(MAX_SCALAR_CHARS).collect(),
        };
    }

    let next_indent = format!("{indent}  ");
    match value {
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        Value::Object(map) => {
            let mut lines = vec!["{".to_string()];
            for (key, child) in map.iter().take(max_items) {
                let rendered = summarize(child, max_depth, max_items, depth + 1, &next_indent);
                lines.push(format!("{next_indent}{}: {rendered},", Value::String(key.clone())));
            }
            if map.len() > max_items {
                lines.push(format!("{next_indent}... +{} more keys", map.len() - max_items));
            }
            lines.push(format!("{indent}}}"));
            lines.join("\n")
        }
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) if items.len() <= INLINE_ARRAY_ITEMS && items.iter().all(is_scalar) => {
            let literals: Vec<String> = items.iter().map(Value::to_string).collect();
            format!("[{}]", literals.join(", "))
        }
        Value::Array(items) => {
            let mut lines = vec![format!("[ // {} items", items.len())];
            for child in items.iter().take(max_items) {
                let rendered = summarize(child, max_depth, max_items, depth + 1, &next_indent);
                lines.push(format!("{next_indent}{rendered},"));
            }
            if items.len() > max_items {
                lines.push(format!("{next_indent}... +{} more items", items.len() - max_items));
            }
            lines.push(format!("{indent}]"));
            lines.join("\n")
        }
        Value::String(text) if text.chars().count() > MAX_STRING_CHARS => {
            let head: String = text.chars().take(MAX_STRING_CHARS).collect();
            let quoted = Value::String(head).to_string();
            format!("{}...\"", &quoted[..quoted.len() - 1])
        }
        scalar => scalar.to_string(),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}
