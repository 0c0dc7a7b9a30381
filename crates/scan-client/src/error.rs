//! Error types for scanner client operations

use scan_core::BackendError;
use thiserror::Error;

/// Result type alias for scanner client operations
pub type Result<T> = std::result::Result<T, ScannerClientError>;

/// Errors that can occur during scanner client operations
#[derive(Error, Debug)]
pub enum ScannerClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Scanner returned a non-success status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ScannerClientError {
    /// Create a server error from status code and message
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }
}

impl From<ScannerClientError> for BackendError {
    fn from(err: ScannerClientError) -> Self {
        match err {
            ScannerClientError::ServerError { status, message } => BackendError::Rejected {
                status,
                body: message,
            },
            ScannerClientError::ParseError(msg) => BackendError::InvalidResponse(msg),
            ScannerClientError::HttpError(e) => BackendError::Transport(e.to_string()),
            ScannerClientError::IoError(e) => BackendError::Transport(e.to_string()),
            ScannerClientError::InvalidUrl(e) => BackendError::Internal(e.to_string()),
        }
    }
}
