//! Integration tests for ScannerClient against a fake scanner

use bytes::Bytes;
use pretty_assertions::assert_eq;
use scan_client::testing::{FakeScanner, TestServer};
use scan_client::ScannerClientError;
use scan_core::{BackendError, ScanBackend, UploadedFile};

fn sample_file() -> UploadedFile {
    UploadedFile::new(
        "dropper.exe",
        Some("application/x-msdownload".to_string()),
        Bytes::from_static(b"MZ\x90\x00\x03\x00\x00\x00"),
    )
}

#[tokio::test]
async fn test_submit_parses_verdict() {
    let scanner = FakeScanner::json(
        200,
        r#"{"verdict":"Malicious","confidence":91,"sha256":"abc123"}"#,
    );
    let server = TestServer::start(scanner.router()).await.unwrap();

    let verdict = server.client.submit(&sample_file()).await.unwrap();

    assert_eq!(verdict.verdict.as_deref(), Some("Malicious"));
    assert_eq!(verdict.confidence.as_deref(), Some("91"));
    assert_eq!(verdict.sha256.as_deref(), Some("abc123"));
}

#[tokio::test]
async fn test_submit_forwards_file_unchanged() {
    let scanner = FakeScanner::json(200, r#"{"verdict":"Clean"}"#);
    let server = TestServer::start(scanner.router()).await.unwrap();

    server.client.submit(&sample_file()).await.unwrap();

    let received = scanner.received();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].field, "file");
    assert_eq!(received[0].file_name.as_deref(), Some("dropper.exe"));
    assert_eq!(
        received[0].content_type.as_deref(),
        Some("application/x-msdownload")
    );
    assert_eq!(received[0].data, Bytes::from_static(b"MZ\x90\x00\x03\x00\x00\x00"));
}

#[tokio::test]
async fn test_submit_keeps_error_text() {
    let scanner = FakeScanner::text(503, "model warming up");
    let server = TestServer::start(scanner.router()).await.unwrap();

    let err = server.client.submit(&sample_file()).await.unwrap_err();

    match err {
        ScannerClientError::ServerError { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "model warming up");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_rejects_malformed_json() {
    let scanner = FakeScanner::text(200, "<html>maintenance</html>");
    let server = TestServer::start(scanner.router()).await.unwrap();

    let err = server.client.submit(&sample_file()).await.unwrap_err();
    assert!(matches!(err, ScannerClientError::ParseError(_)));
}

#[tokio::test]
async fn test_backend_trait_maps_rejection() {
    let scanner = FakeScanner::text(500, "internal error");
    let server = TestServer::start(scanner.router()).await.unwrap();

    let err = server.client.scan(&sample_file()).await.unwrap_err();

    assert_eq!(err.status_code(), 500);
    assert_eq!(err.to_string(), "Backend scan failed: internal error");
    assert!(matches!(err, BackendError::Rejected { .. }));
}

#[tokio::test]
async fn test_unreachable_scanner_is_transport_error() {
    let scanner = FakeScanner::json(200, "{}");
    let server = TestServer::start(scanner.router()).await.unwrap();
    let client = server.client.clone();
    server.shutdown().await;

    let err = client.scan(&sample_file()).await.unwrap_err();
    assert!(matches!(err, BackendError::Transport(_)));
}
