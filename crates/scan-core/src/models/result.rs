//! Caller-facing scan result

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::generate_analysis_id;
use crate::backend::UploadedFile;
use crate::classify::classify_verdict;
use crate::models::BackendVerdict;

/// Key of the single synthetic entry in `ScanResult::results`
pub const ENGINE_KEY: &str = "NeuroShield_AI_Model";
/// Engine name reported inside the synthetic entry
pub const ENGINE_NAME: &str = "NeuroShield_Analysis_Engine";
/// Category reported for the synthetic entry
pub const ENGINE_CATEGORY: &str = "type-unsupported";
/// Detection method reported for the synthetic entry
pub const ENGINE_METHOD: &str = "machine_learning";

/// Overall outcome of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    /// Backend produced a verdict
    Completed,
    /// Backend reported an error next to its verdict
    Error,
}

/// Scan result returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub status: ScanStatus,
    pub threat_label: String,
    /// Unix seconds
    pub scan_date: i64,
    pub file_info: FileInfo,
    pub stats: DetectionStats,
    pub results: BTreeMap<String, EngineResult>,
    pub analysis_id: String,
    /// Never populated; kept for schema compatibility
    pub permalink: Option<String>,
    pub error: Option<String>,
}

/// Metadata of the scanned file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    pub md5: Option<String>,
    pub sha1: Option<String>,
    pub sha256: Option<String>,
}

/// Detection counters, each 0 or 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionStats {
    pub malicious: u32,
    pub suspicious: u32,
    pub harmless: u32,
    pub undetected: u32,
    pub timeout: u32,
}

/// Per-engine result entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineResult {
    pub category: String,
    pub engine_name: String,
    pub result: String,
    pub method: String,
}

impl ScanResult {
    /// Reshape a backend verdict into the caller-facing result.
    ///
    /// Apart from the random suffix of `analysis_id`, the output depends only
    /// on the arguments.
    pub fn from_verdict(file: &UploadedFile, verdict: BackendVerdict, now: DateTime<Utc>) -> Self {
        let status = if verdict.has_error() {
            ScanStatus::Error
        } else {
            ScanStatus::Completed
        };

        let mut results = BTreeMap::new();
        results.insert(
            ENGINE_KEY.to_string(),
            EngineResult {
                category: ENGINE_CATEGORY.to_string(),
                engine_name: ENGINE_NAME.to_string(),
                result: verdict.result_text(),
                method: ENGINE_METHOD.to_string(),
            },
        );

        Self {
            status,
            threat_label: verdict.threat_label().to_string(),
            scan_date: now.timestamp(),
            stats: classify_verdict(verdict.verdict.as_deref()),
            results,
            analysis_id: generate_analysis_id(now),
            permalink: None,
            file_info: FileInfo {
                name: file.name.clone(),
                size: file.size(),
                md5: verdict.md5,
                sha1: verdict.sha1,
                sha256: verdict.sha256,
            },
            error: verdict.error,
        }
    }
}
