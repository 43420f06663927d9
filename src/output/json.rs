//! JSON output formatting for breathe.

use serde_json::json;

use crate::error::BreatheError;
use crate::history::{HistorySummary, SessionRecord};
use crate::patterns::PatternEntry;
use crate::session::{BreathingPattern, CountDirection, ScriptStep};

/// Format the pattern catalogue as JSON
///
/// # Errors
///
/// Returns `BreatheError::Json` if JSON serialization fails.
pub fn format_patterns_json(entries: &[PatternEntry]) -> Result<String, BreatheError> {
    let output = json!({
        "count": entries.len(),
        "items": entries
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single pattern as JSON
///
/// # Errors
///
/// Returns `BreatheError::Json` if JSON serialization fails.
pub fn format_pattern_json(entry: &PatternEntry) -> Result<String, BreatheError> {
    let mut value = serde_json::to_value(entry)?;
    if let Some(obj) = value.as_object_mut() {
        obj.insert("cycle_seconds".into(), entry.pattern.cycle_seconds().into());
        obj.insert("total_seconds".into(), entry.pattern.total_seconds().into());
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Format a simulated session as JSON
///
/// # Errors
///
/// Returns `BreatheError::Json` if JSON serialization fails.
pub fn format_script_json(
    pattern: &BreathingPattern,
    direction: CountDirection,
    steps: &[ScriptStep],
) -> Result<String, BreatheError> {
    let output = json!({
        "pattern": pattern.id,
        "ratio": pattern.ratio,
        "repetitions": pattern.repetitions,
        "count_direction": direction,
        "steps": steps
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format session history as JSON
///
/// # Errors
///
/// Returns `BreatheError::Json` if JSON serialization fails.
pub fn format_history_json(
    records: &[SessionRecord],
    summary: &HistorySummary,
) -> Result<String, BreatheError> {
    let output = json!({
        "summary": summary,
        "count": records.len(),
        "items": records
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
