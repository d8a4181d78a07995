//! Decoding scanned QR text

use crate::models::QrPayload;
use serde::{Deserialize, Serialize};

/// Result of decoding a scanned QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// A BoxedUp container label
    Container { id: String },
    /// Some URL, not one of ours
    Url { url: String },
    /// Anything else, kept verbatim for display
    Unrecognized { text: String },
}

impl ScanOutcome {
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        match serde_json::from_str::<QrPayload>(trimmed) {
            Ok(payload) => match payload.container_id() {
                Some(id) => ScanOutcome::Container { id: id.to_string() },
                None => ScanOutcome::Unrecognized {
                    text: trimmed.to_string(),
                },
            },
            Err(_) if trimmed.contains("http") => ScanOutcome::Url {
                url: trimmed.to_string(),
            },
            Err(_) => ScanOutcome::Unrecognized {
                text: trimmed.to_string(),
            },
        }
    }

    /// Route to open, only for recognised containers
    pub fn route(&self) -> Option<String> {
        match self {
            ScanOutcome::Container { id } => Some(format!("/tubs/{}", id)),
            _ => None,
        }
    }
}
