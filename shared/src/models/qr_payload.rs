//! Content encoded into container QR codes

use super::container::Container;
use serde::{Deserialize, Serialize};

/// Payload type marker for containers
pub const QR_KIND_TUB: &str = "tub";

/// JSON payload printed inside every container QR code:
/// `{"type":"tub","id":"...","name":"..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl QrPayload {
    pub fn for_container(container: &Container) -> Self {
        Self {
            kind: QR_KIND_TUB.to_string(),
            id: Some(container.id.clone()),
            name: Some(container.name.clone()),
        }
    }

    /// Compact JSON string; field order is fixed so output is stable
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Container id when this is a well-formed container payload
    pub fn container_id(&self) -> Option<&str> {
        if self.kind != QR_KIND_TUB {
            return None;
        }
        self.id.as_deref().filter(|id| !id.is_empty())
    }
}
