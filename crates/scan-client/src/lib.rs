//! Scanner Client Library
//!
//! Typed HTTP client for the remote file scanning backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use scan_client::ScannerClient;
//! use scan_core::UploadedFile;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ScannerClient::new("https://neuroshield-backend.onrender.com")?;
//!
//!     let file = UploadedFile::new("sample.bin", None, Bytes::from_static(b"\x7fELF"));
//!     let verdict = client.submit(&file).await?;
//!     println!("{:?}", verdict.verdict);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides an ephemeral server and a scripted fake
//! scanner for integration tests:
//!
//! ```rust,ignore
//! use scan_client::testing::{FakeScanner, TestServer};
//!
//! let scanner = FakeScanner::json(200, r#"{"verdict":"Clean","confidence":98}"#);
//! let server = TestServer::start(scanner.router()).await?;
//! let verdict = server.client.submit(&file).await?;
//! ```

pub mod client;
pub mod error;
pub mod testing;

pub use client::ScannerClient;
pub use error::{Result, ScannerClientError};
