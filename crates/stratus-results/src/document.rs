//! Decoded response documents

use serde_json::Value;

/// Generic decoded JSON tree handed over by the API client.
pub type Document = Value;

/// JSON object node of a [`Document`].
pub type Object = serde_json::Map<String, Value>;

/// Short name of a value's JSON kind, used in error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Look up the sub-document at `root`.
///
/// An empty root addresses the whole document. Returns `None` when the key is
/// absent or the document is not an object.
pub fn root<'a>(document: &'a Document, root: &str) -> Option<&'a Document> {
    if root.is_empty() {
        return Some(document);
    }
    document.as_object()?.get(root)
}
