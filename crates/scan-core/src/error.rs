//! Common error types for scan backends

use thiserror::Error;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors that can occur while talking to a scan backend
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend answered with a non-success HTTP status
    #[error("Backend scan failed: {body}")]
    Rejected {
        /// HTTP status returned by the backend
        status: u16,
        /// Raw response body, as text
        body: String,
    },

    /// Request never got a response (connection refused, DNS, reset, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// Backend answered 2xx but the body was not a verdict object
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BackendError {
    /// Returns the HTTP status code the caller should see for this error.
    ///
    /// Rejections mirror the backend's own status; everything else is a 500.
    pub fn status_code(&self) -> u16 {
        match self {
            BackendError::Rejected { status, .. } => *status,
            BackendError::Transport(_) => 500,
            BackendError::InvalidResponse(_) => 500,
            BackendError::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_wraps_body() {
        let err = BackendError::Rejected {
            status: 500,
            body: "internal error".to_string(),
        };
        assert_eq!(err.to_string(), "Backend scan failed: internal error");
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_rejected_status_is_mirrored() {
        let err = BackendError::Rejected {
            status: 413,
            body: "too large".to_string(),
        };
        assert_eq!(err.status_code(), 413);
    }

    #[test]
    fn test_other_errors_are_server_errors() {
        assert_eq!(BackendError::Transport("refused".into()).status_code(), 500);
        assert_eq!(
            BackendError::InvalidResponse("expected value".into()).status_code(),
            500
        );
        assert_eq!(BackendError::Internal("boom".into()).status_code(), 500);
    }
}
