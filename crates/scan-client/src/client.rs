//! Scanner HTTP client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use scan_core::{BackendResult, BackendVerdict, ScanBackend, UploadedFile};
use tracing::{debug, instrument};
use url::Url;

use crate::error::{Result, ScannerClientError};

/// Multipart field the scanner reads the file from
pub const FILE_FIELD: &str = "file";

/// Path of the scan endpoint, relative to the backend base URL
const SCAN_PATH: &str = "scan";

/// Client for the remote scanning backend
///
/// Sends each file once; there is no retry and, unless configured with
/// [`ScannerClient::with_timeout`], no request timeout.
#[derive(Debug, Clone)]
pub struct ScannerClient {
    client: Client,
    base_url: Url,
    scan_url: Url,
}

impl ScannerClient {
    /// Create a new scanner client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the scanner (e.g., "https://scanner.example.com")
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().build()?;
        Self::with_client(base_url, client)
    }

    /// Create a new scanner client that gives up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, client)
    }

    fn with_client(base_url: &str, client: Client) -> Result<Self> {
        // Appended rather than joined, so a base with a path prefix keeps it
        let scan_url = Url::parse(&format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            SCAN_PATH
        ))?;
        let base_url = Url::parse(base_url)?;

        Ok(Self {
            client,
            base_url,
            scan_url,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Get the full URL of the scan endpoint
    pub fn scan_url(&self) -> &Url {
        &self.scan_url
    }

    /// Upload a file to `<base>/scan` and parse the verdict.
    ///
    /// Non-success statuses come back as [`ScannerClientError::ServerError`]
    /// carrying the raw response text.
    #[instrument(skip(self, file), fields(file_name = %file.name, size = file.size()))]
    pub async fn submit(&self, file: &UploadedFile) -> Result<BackendVerdict> {
        debug!("Forwarding file to {}", self.scan_url);

        let form = Form::new().part(FILE_FIELD, file_part(file));
        let response = self
            .client
            .post(self.scan_url.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await?;
            return Err(ScannerClientError::server_error(status.as_u16(), message));
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| ScannerClientError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl ScanBackend for ScannerClient {
    fn endpoint(&self) -> String {
        self.scan_url.to_string()
    }

    async fn scan(&self, file: &UploadedFile) -> BackendResult<BackendVerdict> {
        Ok(self.submit(file).await?)
    }
}

/// Build the multipart part for `file`, keeping its name and content type.
///
/// A content type reqwest cannot parse is dropped instead of failing the
/// upload.
fn file_part(file: &UploadedFile) -> Part {
    let bare = || {
        Part::stream_with_length(file.data.clone(), file.size()).file_name(file.name.clone())
    };

    match file.content_type.as_deref() {
        Some(content_type) => bare().mime_str(content_type).unwrap_or_else(|e| {
            debug!(%content_type, error = %e, "Dropping unparseable content type");
            bare()
        }),
        None => bare(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_url_appends_path() {
        let client = ScannerClient::new("https://scanner.example.com").unwrap();
        assert_eq!(client.scan_url().as_str(), "https://scanner.example.com/scan");
    }

    #[test]
    fn test_scan_url_tolerates_trailing_slash() {
        let client = ScannerClient::new("https://scanner.example.com/").unwrap();
        assert_eq!(client.scan_url().as_str(), "https://scanner.example.com/scan");
    }

    #[test]
    fn test_scan_url_keeps_path_prefix() {
        let client = ScannerClient::new("http://localhost:8000/v2").unwrap();
        assert_eq!(client.scan_url().as_str(), "http://localhost:8000/v2/scan");
        assert_eq!(client.endpoint(), "http://localhost:8000/v2/scan");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = ScannerClient::new("neuroshield-backend").unwrap_err();
        assert!(matches!(err, ScannerClientError::InvalidUrl(_)));
    }
}
