//! Static field-metadata tables
//!
//! Every record type publishes one [`Descriptor`], built in a `static` or
//! associated `const` and never mutated. The descriptor names the serialized
//! key of each field, its version gate, and the embedded sub-records that
//! decode from the same JSON object as their parent.

use crate::version::{ApiVersion, VersionGate};

/// A single serialized field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    /// JSON key
    pub name: &'static str,
    /// Versions at which the field is visible in map projections
    pub gate: VersionGate,
}

impl Field {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            gate: VersionGate::OPEN,
        }
    }

    /// Field first appears at `major.minor`.
    pub const fn min_version(self, major: u32, minor: u32) -> Self {
        Self {
            name: self.name,
            gate: VersionGate::new(Some(ApiVersion::new(major, minor)), self.gate.max),
        }
    }

    /// Field was last served at `major.minor`.
    pub const fn max_version(self, major: u32, minor: u32) -> Self {
        Self {
            name: self.name,
            gate: VersionGate::new(self.gate.min, Some(ApiVersion::new(major, minor))),
        }
    }
}

/// An embedded sub-record sharing its parent's JSON object.
#[derive(Debug, Clone, Copy)]
pub struct Embedded {
    /// Name the parent uses to address the component
    pub name: &'static str,
    /// The component's own descriptor
    pub descriptor: &'static Descriptor,
}

impl Embedded {
    pub const fn new(name: &'static str, descriptor: &'static Descriptor) -> Self {
        Self { name, descriptor }
    }
}

/// Field layout of a record type.
#[derive(Debug, Clone, Copy)]
pub struct Descriptor {
    pub type_name: &'static str,
    pub fields: &'static [Field],
    pub embedded: &'static [Embedded],
}

impl Descriptor {
    pub const fn new(type_name: &'static str, fields: &'static [Field]) -> Self {
        Self {
            type_name,
            fields,
            embedded: &[],
        }
    }

    pub const fn with_embedded(self, embedded: &'static [Embedded]) -> Self {
        Self {
            type_name: self.type_name,
            fields: self.fields,
            embedded,
        }
    }
}
