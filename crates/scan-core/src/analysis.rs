//! Display-only analysis identifiers

use chrono::{DateTime, Utc};
use rand::Rng;

/// Prefix of every generated analysis id
pub const ANALYSIS_ID_PREFIX: &str = "neuroshield";

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Build an id of the form `neuroshield-<unix millis>-<9 base36 chars>`.
///
/// The id is for display only; it is never looked up and carries no
/// idempotence guarantee. The random suffix keeps ids distinct within a
/// single millisecond.
pub fn generate_analysis_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();

    format!(
        "{}-{}-{}",
        ANALYSIS_ID_PREFIX,
        now.timestamp_millis(),
        suffix
    )
}
