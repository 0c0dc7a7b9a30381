//! scan-core - Core traits and types for the scan proxy
//!
//! This crate holds everything that does not touch HTTP: the request-scoped
//! data model, the pure verdict classification and response transform, and
//! the `ScanBackend` trait that remote scanners are reached through.

pub mod analysis;
pub mod backend;
pub mod classify;
pub mod error;
pub mod models;

pub use analysis::generate_analysis_id;
pub use backend::{ScanBackend, UploadedFile};
pub use classify::classify_verdict;
pub use error::{BackendError, BackendResult};
pub use models::*;
