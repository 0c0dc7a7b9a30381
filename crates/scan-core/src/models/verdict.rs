//! Verdict reply of the remote scanner

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};

/// Threat label used when the backend supplies neither `threat_level` nor `verdict`
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Verdict as returned by the remote scanner.
///
/// Every field is optional. Apart from `verdict`, fields accept any JSON
/// scalar and are kept as text: `"threat_level": 3` reads as `"3"`. `null`,
/// `""` and `false` are read as absent so that a backend sending
/// `"error": ""` is not mistaken for a failed scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BackendVerdict {
    /// Classification label, e.g. "Malicious" or "Clean"
    #[serde(default, deserialize_with = "non_empty")]
    pub verdict: Option<String>,
    /// Model confidence in percent, as displayed
    #[serde(default, deserialize_with = "lenient_text")]
    pub confidence: Option<String>,
    /// Severity label; preferred over `verdict` for display
    #[serde(default, deserialize_with = "lenient_text")]
    pub threat_level: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub md5: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sha1: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sha256: Option<String>,
    /// Error reported by the backend alongside a 2xx status
    #[serde(default, deserialize_with = "lenient_text")]
    pub error: Option<String>,
}

impl BackendVerdict {
    /// Label shown to callers: `threat_level`, else `verdict`, else "Unknown"
    pub fn threat_label(&self) -> &str {
        self.threat_level
            .as_deref()
            .or(self.verdict.as_deref())
            .unwrap_or(UNKNOWN_LABEL)
    }

    /// Whether the backend reported an error
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    /// Engine result line, e.g. "Clean (98%)".
    ///
    /// Without a confidence only the verdict is shown.
    pub fn result_text(&self) -> String {
        let verdict = self.verdict.as_deref().unwrap_or(UNKNOWN_LABEL);
        match &self.confidence {
            Some(confidence) => format!("{} ({}%)", verdict, confidence),
            None => verdict.to_string(),
        }
    }
}

/// `verdict` is matched on as text, so any other type is a broken reply
fn non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_text(value))
}

/// Display text of a loosely typed field; `None` when the value counts as absent
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s),
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => Some(number_text(&n)),
        // Nested values are kept as compact JSON
        other => Some(other.to_string()),
    }
}

/// 98 and 98.0 both render as "98"
fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string())
    }
}
