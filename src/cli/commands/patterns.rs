//! Pattern CLI command implementation.
//!
//! This module implements the `breathe patterns` command for managing
//! breathing patterns.

use serde_json::json;

use crate::cli::args::{OutputFormat, PatternsCommands};
use crate::error::BreatheError;
use crate::output::{format_pattern, format_patterns};
use crate::patterns::{is_preset, parse_ratio, PatternEntry, PatternSource, PatternStore};
use crate::presenter::is_count;
use crate::session::{BreathingPattern, VoicePrompts};

/// Execute the patterns command.
///
/// # Errors
///
/// Returns an error if the pattern operation fails.
pub fn patterns(
    store: &PatternStore,
    cmd: PatternsCommands,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match cmd {
        PatternsCommands::List => format_patterns(&store.list()?, format),
        PatternsCommands::Show { id } => {
            let pattern = store.get(&id)?;
            let source = if is_preset(&id) {
                PatternSource::Builtin
            } else {
                PatternSource::Custom
            };
            format_pattern(&PatternEntry { source, pattern }, format)
        }
        PatternsCommands::Add {
            id,
            ratio,
            reps,
            name,
            description,
            prompts,
        } => {
            let pattern = build_pattern(&id, &ratio, reps, name, description, prompts)?;
            store.save(&pattern)?;
            match format {
                OutputFormat::Json => {
                    let output = json!({
                        "status": "saved",
                        "pattern": pattern,
                    });
                    Ok(serde_json::to_string_pretty(&output)?)
                }
                OutputFormat::Pretty => Ok(format!(
                    "Saved pattern '{}' ({} x{})",
                    pattern.id,
                    pattern.format_ratio(),
                    pattern.repetitions
                )),
            }
        }
        PatternsCommands::Remove { id } => {
            store.delete(&id)?;
            match format {
                OutputFormat::Json => {
                    let output = json!({
                        "status": "deleted",
                        "id": id,
                    });
                    Ok(serde_json::to_string_pretty(&output)?)
                }
                OutputFormat::Pretty => Ok(format!("Deleted pattern '{id}'")),
            }
        }
    }
}

fn build_pattern(
    id: &str,
    ratio: &str,
    reps: u32,
    name: Option<String>,
    description: Option<String>,
    prompts: Option<Vec<String>>,
) -> Result<BreathingPattern, BreatheError> {
    let mut pattern = BreathingPattern::new(id, parse_ratio(ratio)?, reps);
    if let Some(name) = name {
        pattern = pattern.with_name(name);
    }
    if let Some(description) = description {
        pattern = pattern.with_description(description);
    }
    if let Some(prompts) = prompts {
        let prompts: [String; 4] = prompts.try_into().map_err(|given: Vec<String>| {
            BreatheError::InvalidArgument(format!(
                "--prompts needs 4 comma-separated prompts, got {}",
                given.len()
            ))
        })?;
        if let Some(bad) = prompts.iter().find(|p| p.trim().is_empty() || is_count(p)) {
            return Err(BreatheError::InvalidArgument(format!(
                "--prompts entries must be words, got '{bad}'"
            )));
        }
        pattern = pattern.with_prompts(VoicePrompts::from_array(prompts));
    }
    Ok(pattern)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternFiles;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> PatternStore {
        PatternStore::with_files(PatternFiles::with_dir(dir.path().to_path_buf()))
    }

    #[test]
    fn test_build_pattern_with_prompts() {
        let pattern = build_pattern(
            "night",
            "4-7-8-0",
            3,
            Some("Night".to_string()),
            None,
            Some(vec!["In".into(), "Wait".into(), "Out".into(), "Rest".into()]),
        )
        .unwrap();

        assert_eq!(pattern.ratio, [4, 7, 8, 0]);
        assert_eq!(pattern.display_name(), "Night");
        assert_eq!(pattern.voice_prompts.exhale, "Out");
    }

    #[test]
    fn test_build_pattern_wrong_prompt_count() {
        let result = build_pattern("x", "1-1-1-1", 1, None, None, Some(vec!["In".into()]));
        assert!(matches!(result, Err(BreatheError::InvalidArgument(_))));
    }

    #[test]
    fn test_build_pattern_rejects_blank_and_numeric_prompts() {
        let prompts = |list: [&str; 4]| -> Option<Vec<String>> {
            Some(list.iter().map(|p| (*p).to_string()).collect())
        };

        let blank = build_pattern("x", "1-1-1-1", 1, None, None, prompts(["a", "", "c", "d"]));
        assert!(matches!(blank, Err(BreatheError::InvalidArgument(_))));

        let numeric = build_pattern("x", "1-1-1-1", 1, None, None, prompts(["a", "b", "3", "d"]));
        assert!(matches!(numeric, Err(BreatheError::InvalidArgument(_))));
    }

    #[test]
    fn test_add_show_remove() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let saved = patterns(
            &store,
            PatternsCommands::Add {
                id: "mine".to_string(),
                ratio: "2-0-4-0".to_string(),
                reps: 5,
                name: None,
                description: None,
                prompts: None,
            },
            OutputFormat::Pretty,
        )
        .unwrap();
        assert_eq!(saved, "Saved pattern 'mine' (2-0-4-0 x5)");

        let shown = patterns(
            &store,
            PatternsCommands::Show {
                id: "mine".to_string(),
            },
            OutputFormat::Json,
        )
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&shown).unwrap();
        assert_eq!(json["source"], "custom");
        assert_eq!(json["repetitions"], 5);

        let removed = patterns(
            &store,
            PatternsCommands::Remove {
                id: "mine".to_string(),
            },
            OutputFormat::Pretty,
        )
        .unwrap();
        assert_eq!(removed, "Deleted pattern 'mine'");
        assert!(store.get("mine").is_err());
    }
}
