//! Unified error codes
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 6xxx: Inventory errors
//! - 7xxx: Label printing errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values so they serialize compactly and survive
/// round trips through JSON backups and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,

    // ==================== 6xxx: Inventory ====================
    /// Container not found
    ContainerNotFound = 6001,
    /// Container name is empty
    ContainerNameRequired = 6002,
    /// Item not found
    ItemNotFound = 6101,
    /// Item name is empty
    ItemNameRequired = 6102,

    // ==================== 7xxx: Label printing ====================
    /// Print job has no containers
    PrintJobEmpty = 7001,
    /// Unknown label format
    LabelFormatUnknown = 7002,
    /// QR code could not be encoded
    QrEncodingFailed = 7003,
    /// Print surface could not be opened
    PrintSurfaceUnavailable = 7004,
    /// Print flow step does not allow this action
    PrintFlowInvalid = 7005,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Backend storage error
    BackendError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Timeout error
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",

            ErrorCode::NotAuthenticated => "Not authenticated",
            ErrorCode::InvalidCredentials => "Invalid email or password",

            ErrorCode::ContainerNotFound => "Container not found",
            ErrorCode::ContainerNameRequired => "Container name is required",
            ErrorCode::ItemNotFound => "Item not found",
            ErrorCode::ItemNameRequired => "Item name is required",

            ErrorCode::PrintJobEmpty => "Select at least one container to print",
            ErrorCode::LabelFormatUnknown => "Unknown label format",
            ErrorCode::QrEncodingFailed => "QR code generation failed",
            ErrorCode::PrintSurfaceUnavailable => "Print window could not be opened",
            ErrorCode::PrintFlowInvalid => "Action not available at this step",

            ErrorCode::InternalError => "Internal error",
            ErrorCode::BackendError => "Backend error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            5 => Ok(ErrorCode::InvalidRequest),
            6 => Ok(ErrorCode::InvalidFormat),

            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),

            6001 => Ok(ErrorCode::ContainerNotFound),
            6002 => Ok(ErrorCode::ContainerNameRequired),
            6101 => Ok(ErrorCode::ItemNotFound),
            6102 => Ok(ErrorCode::ItemNameRequired),

            7001 => Ok(ErrorCode::PrintJobEmpty),
            7002 => Ok(ErrorCode::LabelFormatUnknown),
            7003 => Ok(ErrorCode::QrEncodingFailed),
            7004 => Ok(ErrorCode::PrintSurfaceUnavailable),
            7005 => Ok(ErrorCode::PrintFlowInvalid),

            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::BackendError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
