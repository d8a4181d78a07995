//! Data models
//!
//! Typed records for the backend's `tubs` and `items` tables plus the
//! ephemeral label-printing values. Row types mirror the backend column
//! names; insert payloads are validated before they reach a store.

pub mod container;
pub mod item;
pub mod label_format;
pub mod print_job;
pub mod qr_payload;
pub mod session;
pub mod variant;

// Re-exports
pub use container::*;
pub use item::*;
pub use label_format::*;
pub use print_job::*;
pub use qr_payload::*;
pub use session::*;
pub use variant::*;
