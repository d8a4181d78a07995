//! Unified error system for BoxedUp
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`AppError`]: Rich error type with codes, messages, and details
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 6xxx: Inventory errors
//! - 7xxx: Label printing errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ContainerNotFound);
//! assert_eq!(err.code.code(), 6001);
//!
//! let err = AppError::validation("Container name is required")
//!     .with_detail("field", "name");
//! assert!(err.details.is_some());
//! ```

mod codes;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
