//! Shop tag rendering.
//!
//! Tags are stored as a free-form string that is usually JSON: a list of
//! strings or a string-to-string mapping. Anything else (malformed JSON,
//! a JSON scalar, a list with non-string items) renders verbatim. This
//! function never fails.

use serde_json::Value;

/// Renders the `Tags: ...` line for a shop, or `None` when there is nothing
/// to show (absent or empty tags field).
///
/// - `["a","b"]` → `Tags: a, b`
/// - `{"k":"v"}` → `Tags: k: v` (mapping insertion order preserved)
/// - anything else → `Tags: <raw string verbatim>`
pub fn render_tags_line(tags: Option<&str>) -> Option<String> {
    let raw = tags?;
    if raw.trim().is_empty() {
        return None;
    }

    let rendered = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => {
            let strings: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
            match strings {
                Some(parts) => parts.join(", "),
                // A list with non-string members is not a recognized shape
                None => raw.to_string(),
            }
        }
        Ok(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{k}: {s}"),
                other => format!("{k}: {other}"),
            })
            .collect::<Vec<_>>()
            .join(", "),
        _ => raw.to_string(),
    };

    Some(format!("Tags: {rendered}"))
}
