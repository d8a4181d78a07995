//! # boxed-client
//!
//! Backend access for BoxedUp.
//!
//! ## Scope
//!
//! - Backend seams ([`RecordStore`], [`BlobStore`], [`IdentityProvider`])
//! - Hosted backend over HTTP ([`SupabaseBackend`])
//! - Seeded in-memory backend for demo mode ([`DemoBackend`])
//! - Session establishment with demo fallback ([`AppContext`])
//! - Inventory services, search, tag counts and backups
//!
//! ## Example
//!
//! ```ignore
//! use boxed_client::{AppContext, BackendConfig, backend_for};
//!
//! let backend = backend_for(&BackendConfig::placeholder())?;
//! let ctx = AppContext::establish(backend).await?;
//! let containers = ctx.list_containers().await;
//! ```

pub mod backup;
pub mod config;
pub mod context;
pub mod demo;
pub mod error;
pub mod inventory;
pub mod store;
pub mod supabase;

// Re-exports
pub use backup::{Backup, BackupFile, RestoreSummary, backup_file_name};
pub use config::BackendConfig;
pub use context::{AppContext, backend_for};
pub use demo::DemoBackend;
pub use error::{ClientError, ClientResult};
pub use inventory::{
    AddedItem, ContainerDetails, ImageUpload, InventoryStats, TagCount, filter_containers,
    qr_for_container, search_inventory, tag_counts,
};
pub use store::{Backend, BlobHandle, BlobStore, IdentityProvider, RecordStore};
pub use supabase::SupabaseBackend;
