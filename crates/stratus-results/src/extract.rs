//! Decode and projection entry points

use crate::descriptor::Descriptor;
use crate::document::{self, Document, Object};
use crate::error::{Result, ResultError};
use crate::record::{Projectable, Record, Slot};
use crate::version::ApiVersion;
use serde_json::Value;

/// Decode the object under `root` into `R`.
///
/// An absent or null root yields `R::default()`; callers that need to tell
/// "not found" apart check the response status instead. An empty `root`
/// decodes the whole document.
pub fn extract_into<R: Record>(document: &Document, root: &str) -> Result<R> {
    match locate(document, root)? {
        Some(value) => decode_nested(label(root), value),
        None => {
            tracing::debug!(
                root,
                record = R::DESCRIPTOR.type_name,
                "root key absent, using defaults"
            );
            Ok(R::default())
        }
    }
}

/// Decode the array under `root` into a `Vec<R>`, preserving order.
///
/// The first element that fails to decode fails the whole call.
pub fn extract_slice_into<R: Record>(document: &Document, root: &str) -> Result<Vec<R>> {
    match locate(document, root)? {
        Some(value) => decode_nested_list(label(root), value),
        None => {
            tracing::debug!(
                root,
                record = R::DESCRIPTOR.type_name,
                "root key absent, using empty list"
            );
            Ok(Vec::new())
        }
    }
}

/// Decode a nested record field. Null gives the default record.
pub fn decode_nested<R: Record>(field: &str, value: &Document) -> Result<R> {
    match value {
        Value::Object(object) => R::decode(object),
        Value::Null => Ok(R::default()),
        other => Err(ResultError::mismatch(field, "object", other)),
    }
}

/// Decode a list-of-records field. Null gives an empty list.
pub fn decode_nested_list<R: Record>(field: &str, value: &Document) -> Result<Vec<R>> {
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| decode_nested(&format!("{field}[{i}]"), item))
            .collect(),
        Value::Null => Ok(Vec::new()),
        other => Err(ResultError::mismatch(field, "array", other)),
    }
}

/// Project a decoded record into a map keyed by serialized field name.
///
/// Fields whose version gate does not admit `version` are left out.
/// Embedded components are flattened into the same map; on a name clash the
/// field written last wins.
pub fn project(record: &dyn Projectable, version: Option<ApiVersion>) -> Object {
    let mut out = Object::new();
    project_onto(record, record.descriptor(), version, &mut out);
    out
}

/// [`project`] applied to each record in order.
pub fn project_slice<R: Record>(records: &[R], version: Option<ApiVersion>) -> Vec<Object> {
    records.iter().map(|r| project(r, version)).collect()
}

fn project_onto(
    record: &dyn Projectable,
    descriptor: &'static Descriptor,
    version: Option<ApiVersion>,
    out: &mut Object,
) {
    for field in descriptor.fields {
        if !field.gate.admits(version) {
            tracing::trace!(
                record = descriptor.type_name,
                field = field.name,
                "field hidden at requested version"
            );
            continue;
        }
        let Some(slot) = record.read(field.name) else {
            tracing::warn!(
                record = descriptor.type_name,
                field = field.name,
                "declared field has no slot, skipping"
            );
            continue;
        };
        let value = match slot {
            Slot::Value(value) => value,
            Slot::Record(inner) => Value::Object(project(inner, version)),
            Slot::Records(items) => Value::Array(
                items
                    .into_iter()
                    .map(|inner| Value::Object(project(inner, version)))
                    .collect(),
            ),
        };
        out.insert(field.name.to_string(), value);
    }
    for part in descriptor.embedded {
        match record.part(part.name) {
            Some(inner) => project_onto(inner, part.descriptor, version, out),
            None => tracing::warn!(
                record = descriptor.type_name,
                component = part.name,
                "declared component is missing, skipping"
            ),
        }
    }
}

fn locate<'a>(document: &'a Document, root: &str) -> Result<Option<&'a Document>> {
    if !root.is_empty() && !matches!(document, Value::Object(_) | Value::Null) {
        return Err(ResultError::mismatch(label(root), "object", document));
    }
    Ok(document::root(document, root).filter(|v| !v.is_null()))
}

fn label(root: &str) -> &str {
    if root.is_empty() {
        "<body>"
    } else {
        root
    }
}
