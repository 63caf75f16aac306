//! Coercion between JSON values and field types
//!
//! JSON `null` decodes to the type's zero value everywhere, which lets a
//! service send `"updated_at": null` for a record that was never touched.
//! Everything else must match the declared kind; lossless numeric widening
//! (`12345.0` into an integer field) is the only coercion performed.

use crate::document::{Document, Object};
use crate::error::{Result, ResultError};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Number, Value};

/// A field type that can be read from and written back to a [`Document`].
pub trait FieldValue: Sized {
    /// Decode `value` found under the serialized name `field`.
    fn from_document(field: &str, value: &Document) -> Result<Self>;

    /// Encode for map projection.
    fn to_document(&self) -> Document;
}

/// Zero timestamp a `null` time field decodes to.
pub fn zero_time() -> DateTime<Utc> {
    DateTime::<Utc>::default()
}

impl FieldValue for String {
    fn from_document(field: &str, value: &Document) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s.clone()),
            Value::Null => Ok(String::new()),
            other => Err(ResultError::mismatch(field, "string", other)),
        }
    }

    fn to_document(&self) -> Document {
        Value::String(self.clone())
    }
}

impl FieldValue for bool {
    fn from_document(field: &str, value: &Document) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Null => Ok(false),
            other => Err(ResultError::mismatch(field, "boolean", other)),
        }
    }

    fn to_document(&self) -> Document {
        Value::Bool(*self)
    }
}

macro_rules! integer_field {
    ($($t:ty),*) => {$(
        impl FieldValue for $t {
            fn from_document(field: &str, value: &Document) -> Result<Self> {
                let n = match value {
                    Value::Null => return Ok(0),
                    Value::Number(n) => n,
                    other => return Err(ResultError::mismatch(field, "integer", other)),
                };
                let converted = if let Some(i) = n.as_i64() {
                    <$t>::try_from(i).ok()
                } else if let Some(u) = n.as_u64() {
                    <$t>::try_from(u).ok()
                } else {
                    // MAX as f64 rounds up for 64-bit types; bound exclusively
                    // at 2^(BITS-1) signed, 2^BITS unsigned.
                    let value_bits = <$t>::BITS as i32 - i32::from(<$t>::MIN != 0);
                    let upper = 2f64.powi(value_bits);
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && *f >= <$t>::MIN as f64 && *f < upper)
                        .map(|f| f as $t)
                };
                converted.ok_or_else(|| ResultError::mismatch(field, "integer", value))
            }

            fn to_document(&self) -> Document {
                Value::from(*self)
            }
        }
    )*};
}

integer_field!(i32, i64, u32, u64);

impl FieldValue for f64 {
    fn from_document(field: &str, value: &Document) -> Result<Self> {
        match value {
            Value::Null => Ok(0.0),
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| ResultError::mismatch(field, "float", value)),
            other => Err(ResultError::mismatch(field, "float", other)),
        }
    }

    fn to_document(&self) -> Document {
        Number::from_f64(*self).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl FieldValue for DateTime<Utc> {
    fn from_document(field: &str, value: &Document) -> Result<Self> {
        match value {
            Value::Null => Ok(zero_time()),
            Value::String(s) => DateTime::parse_from_rfc3339(s)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|_| ResultError::TimeParse {
                    field: field.to_string(),
                    value: s.clone(),
                }),
            other => Err(ResultError::TimeParse {
                field: field.to_string(),
                value: other.to_string(),
            }),
        }
    }

    fn to_document(&self) -> Document {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FieldValue for Object {
    fn from_document(field: &str, value: &Document) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map.clone()),
            Value::Null => Ok(Object::new()),
            other => Err(ResultError::mismatch(field, "object", other)),
        }
    }

    fn to_document(&self) -> Document {
        Value::Object(self.clone())
    }
}

impl FieldValue for Value {
    fn from_document(_field: &str, value: &Document) -> Result<Self> {
        Ok(value.clone())
    }

    fn to_document(&self) -> Document {
        self.clone()
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn from_document(field: &str, value: &Document) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_document(field, other).map(Some),
        }
    }

    fn to_document(&self) -> Document {
        self.as_ref().map(T::to_document).unwrap_or(Value::Null)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn from_document(field: &str, value: &Document) -> Result<Self> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| T::from_document(&format!("{field}[{i}]"), item))
                .collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(ResultError::mismatch(field, "array", other)),
        }
    }

    fn to_document(&self) -> Document {
        Value::Array(self.iter().map(T::to_document).collect())
    }
}
