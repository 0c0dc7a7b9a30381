//! ScanBackend trait - the abstraction over remote scanning services

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BackendResult;
use crate::models::BackendVerdict;

/// Name given to multipart file fields that carry no filename
pub const DEFAULT_FILE_NAME: &str = "blob";

/// A file received from a caller, held only for the lifetime of one request
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Original filename as sent by the caller
    pub name: String,
    /// MIME type of the part, if the caller sent one
    pub content_type: Option<String>,
    /// Raw file content
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, content_type: Option<String>, data: Bytes) -> Self {
        Self {
            name: name.into(),
            content_type,
            data,
        }
    }

    /// Size of the file in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// A remote service that classifies uploaded files.
///
/// Implementations forward the file as-is and return the verdict the
/// service produced. They must not retry: one call, one outcome.
#[async_trait]
pub trait ScanBackend: Send + Sync {
    /// Human readable location of the backend, used in logs
    fn endpoint(&self) -> String;

    /// Submit a file for scanning and return the backend's verdict
    async fn scan(&self, file: &UploadedFile) -> BackendResult<BackendVerdict>;
}
