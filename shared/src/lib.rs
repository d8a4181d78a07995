//! Shared types for BoxedUp
//!
//! Common types used across the workspace: typed inventory records,
//! label formats and print jobs, the session context, voice/scan intents
//! and the unified error system.

pub mod error;
pub mod intent;
pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use intent::{ScanOutcome, VoiceIntent};
pub use models::{
    Container, Item, LabelFormat, NewContainer, NewItem, PrintJob, QrImage, QrPayload, Session,
    SessionMode, SessionUser, TubVariant,
};
