//! API error types and conversions

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use scan_core::BackendError;
use serde::Serialize;

/// Body used when a failure carries no message of its own
pub const FALLBACK_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Body of a request that exceeded the duration limit
pub const TIMEOUT_MESSAGE: &str = "Request timed out";

/// API error type that converts to HTTP responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request (missing or unusable input)
    Validation(String),
    /// Scanner answered with a non-success status; mirrored to the caller
    Backend { status: StatusCode, message: String },
    /// 413 Payload Too Large
    PayloadTooLarge(String),
    /// 408 Request Timeout
    Timeout(String),
    /// 500 Internal Server Error
    Unexpected(String),
}

/// Error body: `{"error": "..."}`
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl ApiError {
    /// HTTP status of this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Backend { status, .. } => *status,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Timeout(_) => StatusCode::REQUEST_TIMEOUT,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_type, message) = match self {
            ApiError::Validation(msg) => ("validation", msg),
            ApiError::Backend { message, .. } => ("backend", message),
            ApiError::PayloadTooLarge(msg) => ("payload_too_large", msg),
            ApiError::Timeout(msg) => ("timeout", msg),
            ApiError::Unexpected(msg) => ("unexpected", msg),
        };

        let message = if message.is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        };

        // Log errors at appropriate levels
        if status.is_server_error() {
            tracing::error!(error = error_type, status = status.as_u16(), %message, "API error");
        } else if status.is_client_error() {
            tracing::debug!(error = error_type, status = status.as_u16(), %message, "API client error");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        let message = err.to_string();
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
        match err {
            BackendError::Rejected { .. } => ApiError::Backend { status, message },
            _ => ApiError::Unexpected(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_body() {
        let response = ApiError::Validation("No file provided".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "No file provided"})
        );
    }

    #[tokio::test]
    async fn test_rejection_mirrors_status() {
        let err: ApiError = BackendError::Rejected {
            status: 422,
            body: "unsupported file type".to_string(),
        }
        .into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Backend scan failed: unsupported file type"})
        );
    }

    #[tokio::test]
    async fn test_transport_failure_is_500() {
        let err: ApiError = BackendError::Transport("connection refused".to_string()).into();
        let response = err.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Transport error: connection refused"})
        );
    }

    #[tokio::test]
    async fn test_empty_message_uses_fallback() {
        let response = ApiError::Unexpected(String::new()).into_response();
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "An unexpected error occurred"})
        );
    }

    #[tokio::test]
    async fn test_timeout_body() {
        let response = ApiError::Timeout(TIMEOUT_MESSAGE.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({"error": "Request timed out"})
        );
    }
}
