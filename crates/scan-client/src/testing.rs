//! Test utilities for scan-client
//!
//! Provides an ephemeral HTTP server and a scripted fake scanner for
//! integration tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Multipart, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use bytes::Bytes;
use parking_lot::Mutex;
use tokio::net::TcpListener;

use crate::{Result, ScannerClient};

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    /// Client pointed at this server, as if it were the scanner
    pub client: ScannerClient,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Create a new test server from an axum Router
    ///
    /// # Example
    ///
    /// ```ignore
    /// use scan_client::testing::{FakeScanner, TestServer};
    ///
    /// let scanner = FakeScanner::json(200, r#"{"verdict":"Clean"}"#);
    /// let server = TestServer::start(scanner.router()).await?;
    /// let verdict = server.client.submit(&file).await?;
    /// ```
    pub async fn start<S>(router: axum::Router<S>) -> Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        Self::start_with_timeout(router, Duration::from_secs(5)).await
    }

    /// Create a new test server whose client uses a custom timeout
    pub async fn start_with_timeout<S>(router: axum::Router<S>, timeout: Duration) -> Result<Self>
    where
        S: Clone + Send + Sync + 'static,
        axum::Router<S>: Into<axum::Router>,
    {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let router: axum::Router = router.into();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        let base_url = format!("http://{}", addr);
        let client = ScannerClient::with_timeout(&base_url, timeout)?;

        Ok(Self {
            addr,
            client,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Build a full URL for `path` on this server
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// A multipart field as received by [`FakeScanner`]
#[derive(Debug, Clone)]
pub struct ReceivedUpload {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Scripted stand-in for the remote scanner.
///
/// Answers every `POST /scan` with the same status and body and records the
/// multipart fields it was sent.
#[derive(Clone)]
pub struct FakeScanner {
    status: StatusCode,
    body: Arc<String>,
    content_type: &'static str,
    received: Arc<Mutex<Vec<ReceivedUpload>>>,
}

impl FakeScanner {
    /// Reply with a JSON body
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self::with_content_type(status, body, "application/json")
    }

    /// Reply with a plain text body
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::with_content_type(status, body, "text/plain; charset=utf-8")
    }

    fn with_content_type(status: u16, body: impl Into<String>, content_type: &'static str) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: Arc::new(body.into()),
            content_type,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Router exposing `POST /scan`
    pub fn router(&self) -> Router {
        Router::new()
            .route("/scan", post(fake_scan))
            .with_state(self.clone())
    }

    /// All fields received so far, in arrival order
    pub fn received(&self) -> Vec<ReceivedUpload> {
        self.received.lock().clone()
    }
}

async fn fake_scan(State(scanner): State<FakeScanner>, mut multipart: Multipart) -> Response {
    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let data = field.bytes().await.unwrap_or_default();

        scanner.received.lock().push(ReceivedUpload {
            field: field_name,
            file_name,
            content_type,
            data,
        });
    }

    let mut response = (scanner.status, scanner.body.as_str().to_owned()).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(scanner.content_type),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_format() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        let url = format!("http://{}", addr);
        assert_eq!(url, "http://127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_status_falls_back_to_500() {
        let scanner = FakeScanner::text(42, "nope");
        assert_eq!(scanner.status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
