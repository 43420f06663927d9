//! Output formatting for breathe.
//!
//! This module provides formatters for displaying patterns, session scripts
//! and history in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::BreatheError;
use crate::history::{HistorySummary, SessionRecord};
use crate::patterns::PatternEntry;
use crate::session::{BreathingPattern, CountDirection, ScriptStep};

pub use json::*;
pub use pretty::*;

/// Format the pattern catalogue based on output format
///
/// # Errors
///
/// Returns `BreatheError::Json` if JSON serialization fails.
pub fn format_patterns(
    entries: &[PatternEntry],
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_patterns_pretty(entries)),
        OutputFormat::Json => format_patterns_json(entries),
    }
}

/// Format a single pattern based on output format
///
/// # Errors
///
/// Returns `BreatheError::Json` if JSON serialization fails.
pub fn format_pattern(entry: &PatternEntry, format: OutputFormat) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_pattern_pretty(entry)),
        OutputFormat::Json => format_pattern_json(entry),
    }
}

/// Format a simulated session based on output format
///
/// # Errors
///
/// Returns `BreatheError::Json` if JSON serialization fails.
pub fn format_script(
    pattern: &BreathingPattern,
    direction: CountDirection,
    steps: &[ScriptStep],
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_script_pretty(pattern, direction, steps)),
        OutputFormat::Json => format_script_json(pattern, direction, steps),
    }
}

/// Format session history based on output format
///
/// # Errors
///
/// Returns `BreatheError::Json` if JSON serialization fails.
pub fn format_history(
    records: &[SessionRecord],
    summary: &HistorySummary,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(records, summary)),
        OutputFormat::Json => format_history_json(records, summary),
    }
}
