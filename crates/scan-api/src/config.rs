//! Backend location and request limits

use std::time::Duration;

/// Primary environment variable holding the scanner base URL
pub const BACKEND_URL_ENV: &str = "EMBER_API_URL";
/// Secondary environment variable, consulted when the primary is unset
pub const PUBLIC_BACKEND_URL_ENV: &str = "NEXT_PUBLIC_EMBER_API_URL";
/// Scanner used when nothing else is configured
pub const DEFAULT_BACKEND_URL: &str = "https://neuroshield-backend.onrender.com";

/// Default upper bound on an accepted upload (100 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;
/// Default upper bound on the duration of one request
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Pick the scanner base URL.
///
/// Order: `EMBER_API_URL`, `NEXT_PUBLIC_EMBER_API_URL`, `configured`, then
/// [`DEFAULT_BACKEND_URL`]. Empty values are skipped.
pub fn resolve_backend_url<F>(lookup: F, configured: Option<&str>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    [BACKEND_URL_ENV, PUBLIC_BACKEND_URL_ENV]
        .into_iter()
        .filter_map(|key| lookup(key))
        .chain(configured.map(str::to_string))
        .find(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
}

/// Resolve the scanner base URL from the process environment
pub fn backend_url_from_env(configured: Option<&str>) -> String {
    resolve_backend_url(|key| std::env::var(key).ok(), configured)
}

/// Limits applied by the router
#[derive(Debug, Clone, Copy)]
pub struct ApiLimits {
    /// Largest request body accepted, in bytes
    pub max_upload_bytes: usize,
    /// Requests running longer than this are cut off with 408
    pub request_timeout: Duration,
}

impl Default for ApiLimits {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_primary_env_wins() {
        let lookup = env(&[
            (BACKEND_URL_ENV, "http://primary:8000"),
            (PUBLIC_BACKEND_URL_ENV, "http://public:8000"),
        ]);
        assert_eq!(
            resolve_backend_url(lookup, Some("http://config:8000")),
            "http://primary:8000"
        );
    }

    #[test]
    fn test_public_env_is_second() {
        let lookup = env(&[(PUBLIC_BACKEND_URL_ENV, "http://public:8000")]);
        assert_eq!(
            resolve_backend_url(lookup, Some("http://config:8000")),
            "http://public:8000"
        );
    }

    #[test]
    fn test_configured_value_before_default() {
        assert_eq!(
            resolve_backend_url(env(&[]), Some("http://config:8000")),
            "http://config:8000"
        );
    }

    #[test]
    fn test_default_when_nothing_set() {
        assert_eq!(resolve_backend_url(env(&[]), None), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let lookup = env(&[(BACKEND_URL_ENV, ""), (PUBLIC_BACKEND_URL_ENV, "  ")]);
        assert_eq!(resolve_backend_url(lookup, Some("")), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn test_default_limits() {
        let limits = ApiLimits::default();
        assert_eq!(limits.max_upload_bytes, 104_857_600);
        assert_eq!(limits.request_timeout, Duration::from_secs(300));
    }
}
