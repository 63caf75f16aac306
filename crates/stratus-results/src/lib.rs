//! Typed extraction of decoded API responses
//!
//! Responses from the orchestration API wrap their payload in a single root
//! key: `{"receiver": {...}}` for one resource, `{"receivers": [...]}` for a
//! collection. This crate decodes such payloads into typed [`Record`]s using
//! a static [`Descriptor`] per type, and projects decoded records back into
//! plain maps with fields filtered by API microversion.
//!
//! # Example
//!
//! ```rust,ignore
//! use stratus_results::{ExtractConfig, Response};
//!
//! let response = Response::from_json(body)?.with_header("OpenStack-API-Version", "2.10");
//! let server: Server = response.extract_into("server")?;
//! let visible = response.extract_map(&server, &ExtractConfig::default())?;
//! ```
//!
//! Extraction is pure and synchronous; nothing here performs I/O.

pub mod config;
pub mod descriptor;
pub mod document;
pub mod error;
pub mod extract;
pub mod record;
pub mod response;
pub mod value;
pub mod version;

pub use config::ExtractConfig;
pub use descriptor::{Descriptor, Embedded, Field};
pub use document::{Document, Object};
pub use error::{Result, ResultError};
pub use extract::{
    decode_nested, decode_nested_list, extract_into, extract_slice_into, project, project_slice,
};
pub use record::{decode_fields, Projectable, Record, Slot};
pub use response::Response;
pub use value::{zero_time, FieldValue};
pub use version::{ApiVersion, VersionGate};
