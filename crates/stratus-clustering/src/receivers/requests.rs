//! Receiver operations and their request options

use super::types::{Receiver, ReceiverType};
use crate::client::{send, ApiClient, ApiRequest};
use crate::error::{ClusteringError, Result};
use crate::pagination::Pager;
use serde::Serialize;
use serde_json::json;
use stratus_results::{Document, Object};

const COLLECTION: &str = "receivers";
const ROOT: &str = "receiver";
const LIST_ROOT: &str = "receivers";

/// Request id header returned by `notify`
pub const REQUEST_ID_HEADER: &str = "X-OpenStack-Request-Id";

fn resource_path(id: &str) -> String {
    format!("{COLLECTION}/{id}")
}

// ==================== Options ====================

/// Options for creating a receiver
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateOpts {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cluster_id: String,
    #[serde(rename = "type")]
    pub receiver_type: Option<ReceiverType>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action: String,
    #[serde(skip_serializing_if = "Object::is_empty")]
    pub actor: Object,
    #[serde(skip_serializing_if = "Object::is_empty")]
    pub params: Object,
}

impl CreateOpts {
    /// Build the `{"receiver": {...}}` request body
    pub fn to_receiver_create_map(&self) -> Result<Document> {
        if self.name.is_empty() {
            return Err(ClusteringError::MissingField("name"));
        }
        if self.receiver_type.is_none() {
            return Err(ClusteringError::MissingField("type"));
        }
        Ok(json!({ ROOT: serde_json::to_value(self)? }))
    }
}

/// Options for updating a receiver; empty fields are left unchanged
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateOpts {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub action: String,
    #[serde(skip_serializing_if = "Object::is_empty")]
    pub params: Object,
}

impl UpdateOpts {
    /// Build the `{"receiver": {...}}` request body
    pub fn to_receiver_update_map(&self) -> Result<Document> {
        Ok(json!({ ROOT: serde_json::to_value(self)? }))
    }
}

/// Filters and paging for listing receivers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOpts {
    pub limit: Option<u32>,
    /// Id of the last receiver on the previous page
    pub marker: String,
    /// Comma-separated `key[:dir]` list, e.g. `name:asc,status:desc`
    pub sort: String,
    pub global_project: Option<bool>,
    pub name: String,
    pub receiver_type: Option<ReceiverType>,
    pub cluster_id: String,
    pub action: String,
    pub user: String,
}

impl ListOpts {
    /// Query parameters in a stable order; unset options are omitted
    pub fn to_receiver_list_query(&self) -> Result<Vec<(String, String)>> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            if limit == 0 {
                return Err(ClusteringError::InvalidOption {
                    field: "limit",
                    reason: "must be greater than zero".into(),
                });
            }
            params.push(("limit".to_string(), limit.to_string()));
        }

        let mut push = |key: &str, value: &str| {
            if !value.is_empty() {
                params.push((key.to_string(), value.to_string()));
            }
        };
        push("marker", &self.marker);
        push("sort", &self.sort);
        if let Some(global) = self.global_project {
            push("global_project", if global { "true" } else { "false" });
        }
        push("name", &self.name);
        if let Some(kind) = self.receiver_type {
            push("type", kind.as_str());
        }
        push("cluster_id", &self.cluster_id);
        push("action", &self.action);
        push("user", &self.user);

        Ok(params)
    }
}

// ==================== Operations ====================

/// Create a receiver
pub async fn create<C: ApiClient + ?Sized>(client: &C, opts: &CreateOpts) -> Result<Receiver> {
    let body = opts.to_receiver_create_map()?;
    let request = ApiRequest::post(COLLECTION, Some(body)).with_ok_codes(&[200, 201]);
    tracing::debug!(name = %opts.name, "creating receiver");

    let response = send(client, &request).await?;
    Ok(response.extract_into(ROOT)?)
}

/// Get a receiver by id
pub async fn get<C: ApiClient + ?Sized>(client: &C, id: &str) -> Result<Receiver> {
    let response = send(client, &ApiRequest::get(resource_path(id))).await?;
    Ok(response.extract_into(ROOT)?)
}

/// Update a receiver
pub async fn update<C: ApiClient + ?Sized>(
    client: &C,
    id: &str,
    opts: &UpdateOpts,
) -> Result<Receiver> {
    let request = ApiRequest::patch(resource_path(id), opts.to_receiver_update_map()?);
    tracing::debug!(receiver = %id, "updating receiver");

    let response = send(client, &request).await?;
    Ok(response.extract_into(ROOT)?)
}

/// Delete a receiver
pub async fn delete<C: ApiClient + ?Sized>(client: &C, id: &str) -> Result<()> {
    tracing::debug!(receiver = %id, "deleting receiver");
    send(client, &ApiRequest::delete(resource_path(id))).await?;
    Ok(())
}

/// Trigger a message-type receiver; returns the service request id
pub async fn notify<C: ApiClient + ?Sized>(client: &C, id: &str) -> Result<String> {
    let request = ApiRequest::post(format!("{}/actions/notify", resource_path(id)), None)
        .with_ok_codes(&[201, 202]);
    let response = send(client, &request).await?;
    Ok(response
        .header(REQUEST_ID_HEADER)
        .unwrap_or_default()
        .to_string())
}

/// List receivers page by page
pub fn list<'c, C: ApiClient + ?Sized>(
    client: &'c C,
    opts: &ListOpts,
) -> Result<Pager<'c, C, Receiver>> {
    let mut opts = opts.clone();
    if opts.limit.is_none() {
        opts.limit = client.config().default_page_limit;
    }
    let request = ApiRequest::get(COLLECTION).with_query(opts.to_receiver_list_query()?);
    Ok(Pager::new(client, request, LIST_ROOT))
}
