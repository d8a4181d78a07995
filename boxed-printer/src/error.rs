//! Error types for label printing

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Label printing error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Print job has no containers
    #[error("Print job is empty")]
    EmptyJob,

    /// Print surface (window, browser, output file) could not be opened
    #[error("Print surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// QR code could not be encoded
    #[error("QR encoding failed: {0}")]
    QrEncoding(String),

    /// IO error while writing the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid surface or encoder configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Print flow action not allowed at the current step
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Result type for printing operations
pub type PrintResult<T> = Result<T, PrintError>;

impl From<PrintError> for AppError {
    fn from(err: PrintError) -> Self {
        let code = match &err {
            PrintError::EmptyJob => ErrorCode::PrintJobEmpty,
            PrintError::SurfaceUnavailable(_) => ErrorCode::PrintSurfaceUnavailable,
            PrintError::QrEncoding(_) => ErrorCode::QrEncodingFailed,
            PrintError::Io(_) => ErrorCode::InternalError,
            PrintError::InvalidConfig(_) => ErrorCode::ConfigError,
            PrintError::InvalidTransition(_) => ErrorCode::PrintFlowInvalid,
        };
        AppError::with_message(code, err.to_string())
    }
}

impl From<AppError> for PrintError {
    fn from(err: AppError) -> Self {
        match err.code {
            ErrorCode::PrintJobEmpty => PrintError::EmptyJob,
            _ => PrintError::InvalidConfig(err.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_is_recoverable_app_error() {
        let app: AppError = PrintError::SurfaceUnavailable("popup blocked".into()).into();
        assert_eq!(app.code, ErrorCode::PrintSurfaceUnavailable);
        assert!(app.is_recoverable());
        assert!(app.message.contains("popup blocked"));
    }

    #[test]
    fn test_empty_job_roundtrip() {
        let app = AppError::new(ErrorCode::PrintJobEmpty);
        assert!(matches!(PrintError::from(app), PrintError::EmptyJob));
    }
}
