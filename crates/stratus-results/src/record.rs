//! Typed decode targets
//!
//! A [`Record`] pairs a Rust struct with its static [`Descriptor`]. The
//! default [`Record::decode`] walks the descriptor, assigning every field
//! whose serialized name is present and then letting each embedded
//! component decode from the same object. Types that need custom decoding
//! override `decode` outright.

use crate::descriptor::Descriptor;
use crate::document::{Document, Object};
use crate::error::Result;
use crate::value::FieldValue;

/// A field's current value as seen by map projection.
pub enum Slot<'a> {
    /// Plain JSON value
    Value(Document),
    /// Nested record, projected with the same API version
    Record(&'a dyn Projectable),
    /// List of nested records
    Records(Vec<&'a dyn Projectable>),
}

impl<'a> Slot<'a> {
    pub fn of<T: FieldValue>(value: &T) -> Self {
        Slot::Value(value.to_document())
    }

    pub fn record<R: Record>(record: &'a R) -> Self {
        Slot::Record(record)
    }

    pub fn records<R: Record>(records: &'a [R]) -> Self {
        Slot::Records(records.iter().map(|r| r as &dyn Projectable).collect())
    }
}

/// A struct that can be decoded from a JSON object by its descriptor.
///
/// Implement it with [`record!`](crate::record), which builds the
/// descriptor and every lookup table from one field list. Hand-written impls
/// must keep `assign`, `slot` and the embedded hooks in step with
/// `DESCRIPTOR`, and should reject names they do not know with
/// [`ResultError::UnknownField`](crate::ResultError::UnknownField).
pub trait Record: Default {
    /// Field layout, shared by every instance
    const DESCRIPTOR: &'static Descriptor;

    /// Store the decoded value of a direct field.
    fn assign(&mut self, field: &'static str, value: &Document) -> Result<()>;

    /// Read a direct field back for projection.
    fn slot(&self, field: &str) -> Option<Slot<'_>>;

    /// Decode the embedded component `name` from the parent's object.
    fn assign_embedded(&mut self, name: &'static str, object: &Object) -> Result<()>;

    /// Borrow the embedded component `name`.
    fn embedded(&self, name: &str) -> Option<&dyn Projectable>;

    /// Build an instance from a JSON object.
    ///
    /// Override to take full control of decoding; the override replaces
    /// field assignment and embedded dispatch alike.
    fn decode(object: &Object) -> Result<Self> {
        decode_fields(object)
    }
}

/// Implement [`Record`] from a single declaration.
///
/// Sections, in this order:
/// - `fields`: plain values decoded through [`FieldValue`], each optionally
///   followed by `.min_version(M, m)` / `.max_version(M, m)` gates
/// - `records`: nested records, decoded with [`decode_nested`](crate::decode_nested)
/// - `lists`: lists of records, decoded with [`decode_nested_list`](crate::decode_nested_list)
/// - `embedded`: components decoded from the parent's own object by their
///   type's [`Record::decode`]
/// - `methods`: extra trait items, typically a custom `decode`
///
/// Only `fields` is required.
///
/// # Example
///
/// ```rust
/// use stratus_results::{record, extract_into, project, ApiVersion};
///
/// #[derive(Debug, Default)]
/// struct Flavor {
///     id: String,
///     disk: i64,
/// }
///
/// record! {
///     Flavor {
///         fields {
///             "id" => id,
///             "disk" => disk.min_version(2, 1),
///         }
///     }
/// }
///
/// let body = serde_json::json!({"flavor": {"id": "m1", "disk": 20}});
/// let flavor: Flavor = extract_into(&body, "flavor").unwrap();
/// assert_eq!(flavor.disk, 20);
/// assert!(!project(&flavor, None).contains_key("disk"));
/// assert!(project(&flavor, Some(ApiVersion::new(2, 1))).contains_key("disk"));
/// ```
#[macro_export]
macro_rules! record {
    (
        $ty:ident {
            fields {
                $(
                    $name:literal => $field:ident
                    $( . $gate:ident ( $major:literal , $minor:literal ) )*
                ),* $(,)?
            }
            $( records { $( $rname:literal => $rfield:ident ),* $(,)? } )?
            $( lists { $( $lname:literal => $lfield:ident ),* $(,)? } )?
            $( embedded { $( $ename:literal => $efield:ident : $ety:ty ),* $(,)? } )?
            $( methods { $( $method:tt )* } )?
        }
    ) => {
        impl $crate::Record for $ty {
            const DESCRIPTOR: &'static $crate::Descriptor = &$crate::Descriptor::new(
                stringify!($ty),
                &[
                    $( $crate::Field::new($name) $( .$gate($major, $minor) )*, )*
                    $( $( $crate::Field::new($rname), )* )?
                    $( $( $crate::Field::new($lname), )* )?
                ],
            )
            .with_embedded(&[
                $( $( $crate::Embedded::new($ename, <$ety as $crate::Record>::DESCRIPTOR), )* )?
            ]);

            fn assign(
                &mut self,
                field: &'static str,
                value: &$crate::Document,
            ) -> $crate::Result<()> {
                match (field, value) {
                    $( ($name, value) => {
                        self.$field = $crate::FieldValue::from_document(field, value)?;
                        Ok(())
                    } )*
                    $( $( ($rname, value) => {
                        self.$rfield = $crate::decode_nested(field, value)?;
                        Ok(())
                    } )* )?
                    $( $( ($lname, value) => {
                        self.$lfield = $crate::decode_nested_list(field, value)?;
                        Ok(())
                    } )* )?
                    (other, _) => Err($crate::ResultError::UnknownField {
                        record: stringify!($ty),
                        name: other.to_string(),
                    }),
                }
            }

            fn slot(&self, field: &str) -> Option<$crate::Slot<'_>> {
                match field {
                    $( $name => Some($crate::Slot::of(&self.$field)), )*
                    $( $( $rname => Some($crate::Slot::record(&self.$rfield)), )* )?
                    $( $( $lname => Some($crate::Slot::records(&self.$lfield)), )* )?
                    _ => None,
                }
            }

            fn assign_embedded(
                &mut self,
                name: &'static str,
                object: &$crate::Object,
            ) -> $crate::Result<()> {
                match (name, object) {
                    $( $( ($ename, object) => {
                        self.$efield = <$ety as $crate::Record>::decode(object)?;
                        Ok(())
                    } )* )?
                    (other, _) => Err($crate::ResultError::UnknownField {
                        record: stringify!($ty),
                        name: other.to_string(),
                    }),
                }
            }

            fn embedded(&self, name: &str) -> Option<&dyn $crate::Projectable> {
                match name {
                    $( $( $ename => Some(&self.$efield), )* )?
                    _ => None,
                }
            }

            $( $( $method )* )?
        }
    };
}

/// Descriptor-driven decode used by the default [`Record::decode`].
pub fn decode_fields<R: Record>(object: &Object) -> Result<R> {
    let mut record = R::default();
    for field in R::DESCRIPTOR.fields {
        if let Some(value) = object.get(field.name) {
            record.assign(field.name, value)?;
        }
    }
    for part in R::DESCRIPTOR.embedded {
        record.assign_embedded(part.name, object)?;
    }
    Ok(record)
}

/// Object-safe view of a decoded record, used by map projection.
pub trait Projectable {
    fn descriptor(&self) -> &'static Descriptor;

    fn read(&self, field: &str) -> Option<Slot<'_>>;

    fn part(&self, name: &str) -> Option<&dyn Projectable>;
}

impl<R: Record> Projectable for R {
    fn descriptor(&self) -> &'static Descriptor {
        R::DESCRIPTOR
    }

    fn read(&self, field: &str) -> Option<Slot<'_>> {
        self.slot(field)
    }

    fn part(&self, name: &str) -> Option<&dyn Projectable> {
        self.embedded(name)
    }
}
