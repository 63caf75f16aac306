//! Receiver records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use stratus_results::{record, Object};

/// How a receiver is triggered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiverType {
    /// Triggered by calling the receiver's alarm URL
    Webhook,
    /// Triggered by posting to the receiver's message queue
    Message,
}

impl ReceiverType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Webhook => "webhook",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for ReceiverType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A receiver as returned by the service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Receiver {
    /// Cluster action triggered, e.g. `CLUSTER_SCALE_OUT`
    pub action: String,
    /// Credentials the action runs with
    pub actor: Object,
    /// Trigger endpoint details (e.g. `alarm_url`)
    pub channel: Object,
    pub cluster_id: String,
    pub created_at: DateTime<Utc>,
    pub domain: String,
    pub id: String,
    pub name: String,
    /// Action parameters
    pub params: Object,
    pub project: String,
    /// `webhook` or `message`
    pub receiver_type: String,
    /// Zero time when the receiver was never updated
    pub updated_at: DateTime<Utc>,
    pub user: String,
}

record! {
    Receiver {
        fields {
            "action" => action,
            "actor" => actor,
            "channel" => channel,
            "cluster_id" => cluster_id,
            "created_at" => created_at,
            "domain" => domain,
            "id" => id,
            "name" => name,
            "params" => params,
            "project" => project,
            "type" => receiver_type,
            "updated_at" => updated_at,
            "user" => user,
        }
    }
}

impl Receiver {
    /// Parsed receiver type, if the service sent a known one
    pub fn kind(&self) -> Option<ReceiverType> {
        match self.receiver_type.as_str() {
            "webhook" => Some(ReceiverType::Webhook),
            "message" => Some(ReceiverType::Message),
            _ => None,
        }
    }

    /// Webhook trigger URL from the channel
    pub fn alarm_url(&self) -> Option<&str> {
        self.channel.get("alarm_url").and_then(|v| v.as_str())
    }
}
