//! Parsing of ratio strings such as `4-7-8-0`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::BreatheError;

static RATIO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)\s*[-:/,\s]\s*(\d+)\s*[-:/,\s]\s*(\d+)\s*[-:/,\s]\s*(\d+)\s*$")
        .unwrap_or_else(|e| panic!("Invalid ratio regex: {e}"))
});

/// Parse `inhale-hold-exhale-hold` seconds.
///
/// Accepts `-`, `:`, `/`, `,` or whitespace between the four numbers.
///
/// # Errors
///
/// Returns `BreatheError::InvalidArgument` unless the input is exactly four
/// non-negative integers.
pub fn parse_ratio(s: &str) -> Result<[u32; 4], BreatheError> {
    let invalid = || {
        BreatheError::InvalidArgument(format!(
            "ratio '{s}' must be four whole seconds, e.g. 4-7-8-0"
        ))
    };

    let caps = RATIO_RE.captures(s).ok_or_else(invalid)?;
    let mut ratio = [0_u32; 4];
    for (slot, i) in ratio.iter_mut().zip(1..=4) {
        *slot = caps[i].parse().map_err(|_| invalid())?;
    }
    Ok(ratio)
}
