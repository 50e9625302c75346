//! Inbound webhook envelope parsing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header Asana sends on subscription creation and expects echoed back
/// to confirm endpoint ownership.
pub const HOOK_SECRET_HEADER: &str = "X-Hook-Secret";

/// Inbound webhook delivery body.
///
/// Event contents are not individually inspected; any non-empty event list
/// triggers a full recomputation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookEnvelope {
    /// Change events in this delivery
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

/// A single change event.
///
/// Kept loosely typed: the aggregation is recomputed from scratch, so only
/// the presence of events matters for control flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Action that occurred (e.g., "changed", "added")
    #[serde(default)]
    pub action: Option<String>,
    /// Resource the event refers to
    #[serde(default)]
    pub resource: Option<Value>,
    /// User who triggered the event
    #[serde(default)]
    pub user: Option<Value>,
    /// Event timestamp
    #[serde(default)]
    pub created_at: Option<String>,
}

impl WebhookEnvelope {
    /// Whether this delivery carries any change events.
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }
}
