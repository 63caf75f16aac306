//! Clustering service bindings: receivers
//!
//! Receivers are webhook or message registrations that trigger an action
//! (such as `CLUSTER_SCALE_OUT`) on a cluster. This crate builds the
//! requests for the receivers API, hands them to an [`ApiClient`] and decodes
//! the responses with `stratus-results`.
//!
//! # Example
//!
//! ```rust,ignore
//! use stratus_clustering::receivers::{self, CreateOpts, ListOpts, ReceiverType};
//!
//! let receiver = receivers::create(&client, &CreateOpts {
//!     name: "cluster_inflate".into(),
//!     cluster_id: "ae63a10b-4a90-452c-aef1-113a0b255ee3".into(),
//!     receiver_type: Some(ReceiverType::Webhook),
//!     action: "CLUSTER_SCALE_OUT".into(),
//!     ..Default::default()
//! }).await?;
//!
//! let pager = receivers::list(&client, &ListOpts { limit: Some(20), ..Default::default() })?;
//! pager.each_page(|page| {
//!     for r in &page.items {
//!         println!("{} {}", r.id, r.name);
//!     }
//!     Ok(true)
//! }).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod pagination;
pub mod receivers;

pub use client::{ApiClient, ApiRequest, Method};
pub use config::ClusteringConfig;
pub use error::{ClusteringError, Result};
pub use pagination::{Page, Pager};
pub use receivers::{Receiver, ReceiverType};

// Re-export the extraction layer
pub use stratus_results;
