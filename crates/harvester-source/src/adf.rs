//! Atlassian Document Format flattening

use serde_json::Value;

/// Flatten an ADF document into plain text
///
/// Paragraphs are joined by a blank line; `text` children are concatenated and
/// `hardBreak` becomes a newline. Other node types are ignored. `null` or a
/// non-document value gives an empty string, and a bare string is returned as is.
///
/// # Examples
///
/// ```
/// use harvester_source::adf_to_text;
/// use serde_json::json;
///
/// let doc = json!({
///     "type": "doc",
///     "content": [
///         {"type": "paragraph", "content": [{"type": "text", "text": "srv-db1 is down"}]},
///         {"type": "paragraph", "content": [{"type": "text", "text": "since 09:00"}]}
///     ]
/// });
/// assert_eq!(adf_to_text(&doc), "srv-db1 is down\n\nsince 09:00");
/// ```
pub fn adf_to_text(doc: &Value) -> String {
    if let Some(text) = doc.as_str() {
        return text.trim().to_string();
    }

    let paragraphs: Vec<String> = children(doc)
        .filter(|node| node_type(node) == Some("paragraph"))
        .map(|node| {
            let mut paragraph = String::new();
            for child in children(node) {
                match node_type(child) {
                    Some("text") => {
                        paragraph.push_str(child.get("text").and_then(Value::as_str).unwrap_or(""))
                    }
                    Some("hardBreak") => paragraph.push('\n'),
                    _ => {}
                }
            }
            paragraph.trim().to_string()
        })
        .collect();

    paragraphs.join("\n\n").trim().to_string()
}

fn node_type(node: &Value) -> Option<&str> {
    node.get("type").and_then(Value::as_str)
}

fn children(node: &Value) -> impl Iterator<Item = &Value> {
    node.get("content")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
}
