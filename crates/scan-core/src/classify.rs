//! Verdict classification into detection statistics

use crate::models::DetectionStats;

/// Derive detection flags from a verdict label.
///
/// Each category is an independent, case-insensitive substring check, so a
/// label such as "malicious-or-suspicious" raises both flags. `undetected`
/// and `timeout` are never set. A missing label yields all zeros.
pub fn classify_verdict(verdict: Option<&str>) -> DetectionStats {
    let Some(verdict) = verdict else {
        return DetectionStats::default();
    };
    let label = verdict.to_lowercase();

    DetectionStats {
        malicious: flag(label.contains("malicious")),
        suspicious: flag(label.contains("suspicious")),
        harmless: flag(label.contains("clean") || label.contains("benign")),
        undetected: 0,
        timeout: 0,
    }
}

fn flag(hit: bool) -> u32 {
    u32::from(hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clean() {
        let stats = classify_verdict(Some("Clean"));
        assert_eq!(stats.harmless, 1);
        assert_eq!(stats.malicious, 0);
        assert_eq!(stats.suspicious, 0);
    }

    #[test]
    fn test_benign_counts_as_harmless() {
        assert_eq!(classify_verdict(Some("benign")).harmless, 1);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let stats = classify_verdict(Some("MALICIOUS_TROJAN"));
        assert_eq!(stats.malicious, 1);
        assert_eq!(stats.harmless, 0);
    }

    #[test]
    fn test_flags_are_independent() {
        let stats = classify_verdict(Some("Malicious/Suspicious"));
        assert_eq!(stats.malicious, 1);
        assert_eq!(stats.suspicious, 1);
        assert_eq!(stats.harmless, 0);
    }

    #[test]
    fn test_unrecognised_label() {
        assert_eq!(classify_verdict(Some("Packed")), DetectionStats::default());
    }

    #[test]
    fn test_missing_label() {
        assert_eq!(classify_verdict(None), DetectionStats::default());
    }

    #[test]
    fn test_undetected_and_timeout_never_set() {
        let stats = classify_verdict(Some("undetected timeout"));
        assert_eq!(stats.undetected, 0);
        assert_eq!(stats.timeout, 0);
    }
}
