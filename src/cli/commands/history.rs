//! History CLI command implementation.

use serde_json::json;

use crate::cli::args::{HistoryArgs, HistoryCommands, OutputFormat};
use crate::error::BreatheError;
use crate::history::{HistoryStorage, HistorySummary};
use crate::output::format_history;

/// Execute the history command.
///
/// # Errors
///
/// Returns an error if the history cannot be read or cleared.
pub fn history(
    storage: &HistoryStorage,
    args: HistoryArgs,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match args.command {
        Some(HistoryCommands::Clear { force }) => clear_history(storage, force, format),
        None => {
            let (records, summary) = match &args.pattern {
                Some(id) => {
                    let mut records = storage.by_pattern(id)?;
                    let summary = HistorySummary::from_records(&records);
                    records.truncate(args.limit);
                    (records, summary)
                }
                None => (storage.recent(args.limit)?, storage.summary()?),
            };
            format_history(&records, &summary, format)
        }
    }
}

/// Clear all sessions.
fn clear_history(
    storage: &HistoryStorage,
    force: bool,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    if !force {
        return Err(BreatheError::InvalidArgument(
            "This will delete all session history.\nUse --force to confirm.".to_string(),
        ));
    }

    let removed = storage.clear()?;
    match format {
        OutputFormat::Json => {
            let output = json!({
                "status": "cleared",
                "removed": removed,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Pretty => Ok(format!("Removed {removed} session(s) from history.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::SessionRecord;
    use crate::session::{BreathingPattern, CountDirection, EndReason};
    use crate::storage::Database;
    use chrono::Utc;

    fn storage_with(ids: &[&str]) -> HistoryStorage {
        let storage = HistoryStorage::with_database(Database::open_in_memory().unwrap());
        for id in ids {
            let now = Utc::now();
            let mut record = SessionRecord::finished(
                &BreathingPattern::new(*id, [4, 4, 4, 4], 2),
                CountDirection::Down,
                now,
                now,
                EndReason::Completed,
                2,
            );
            storage.save(&mut record).unwrap();
        }
        storage
    }

    fn args(command: Option<HistoryCommands>, pattern: Option<&str>) -> HistoryArgs {
        HistoryArgs {
            command,
            limit: 10,
            pattern: pattern.map(ToString::to_string),
        }
    }

    #[test]
    fn test_history_filtered_by_pattern() {
        let storage = storage_with(&["box", "relax", "box"]);
        let out = history(&storage, args(None, Some("box")), OutputFormat::Json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(json["count"], 2);
        assert_eq!(json["summary"]["sessions"], 2);
    }

    #[test]
    fn test_clear_requires_force() {
        let storage = storage_with(&["box"]);
        let refused = history(
            &storage,
            args(Some(HistoryCommands::Clear { force: false }), None),
            OutputFormat::Pretty,
        );
        assert!(refused.is_err());
        assert_eq!(storage.recent(10).unwrap().len(), 1);

        let out = history(
            &storage,
            args(Some(HistoryCommands::Clear { force: true }), None),
            OutputFormat::Pretty,
        )
        .unwrap();
        assert_eq!(out, "Removed 1 session(s) from history.");
    }
}
