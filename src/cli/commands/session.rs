//! Session commands: `breathe run` and `breathe simulate`.

use std::io::{self, Write};

use colored::Colorize;
use serde_json::json;
use tracing::info;

use crate::cli::args::{OutputFormat, RunArgs, SessionArgs};
use crate::config::Config;
use crate::error::BreatheError;
use crate::history::{HistoryStorage, SessionRecord};
use crate::output::format_script;
use crate::patterns::{parse_ratio, PatternStore};
use crate::presenter::{ConsolePresenter, Speech};
use crate::session::{
    format_duration, simulate as simulate_session, BreathingPattern, SessionController,
    SessionRunner,
};
use crate::tui::{self, App};

/// Pick the pattern a session should use.
///
/// `--ratio` builds a one-off pattern; otherwise the named pattern or the
/// configured default is looked up. `--reps` overrides the cycle count.
///
/// # Errors
///
/// Returns an error if the ratio is malformed or the pattern is unknown.
pub fn resolve_pattern(
    store: &PatternStore,
    args: &SessionArgs,
    config: &Config,
) -> Result<BreathingPattern, BreatheError> {
    let mut pattern = if let Some(ratio) = &args.ratio {
        BreathingPattern::new("custom", parse_ratio(ratio)?, 4).with_name("Custom")
    } else {
        let id = args
            .pattern
            .as_deref()
            .unwrap_or(&config.session.default_pattern);
        store.get(id)?
    };

    if let Some(reps) = args.reps {
        pattern.repetitions = reps;
    }
    pattern.validate()?;
    Ok(pattern)
}

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the pattern cannot be resolved, the session cannot
/// run, or its record cannot be saved.
pub fn run(args: &RunArgs, config: &Config, format: OutputFormat) -> Result<String, BreatheError> {
    let store = PatternStore::new()?;
    let pattern = resolve_pattern(&store, &args.session, config)?;
    let direction = args.session.count.unwrap_or(config.session.count_direction);
    let controller = SessionController::new(direction, config.session.scales());
    let speech = if config.session.voice && !args.no_voice {
        config
            .session
            .speech_command
            .as_deref()
            .map(Speech::parse)
            .transpose()?
            .flatten()
    } else {
        None
    };

    let records = if args.headless {
        if format == OutputFormat::Pretty {
            println!(
                "{} {} x{} ({})\n",
                pattern.display_name().bold(),
                pattern.format_ratio().yellow(),
                pattern.repetitions,
                format_duration(pattern.total_seconds())
            );
        }
        // Keep stdout clean for the JSON summary.
        let out: Box<dyn Write> = match format {
            OutputFormat::Pretty => Box::new(io::stdout()),
            OutputFormat::Json => Box::new(io::stderr()),
        };
        let presenter = ConsolePresenter::new(out)
            .with_speech(speech)
            .with_haptics(config.session.haptics);
        let mut runner = SessionRunner::new(controller, presenter);
        runner.start(pattern, std::time::Instant::now())?;
        runner.run_to_completion();
        runner.take_finished()
    } else {
        let app = App::new(config.session.rest_scale)
            .with_speech(speech)
            .with_haptics(config.session.haptics);
        let mut runner = SessionRunner::new(controller, app);
        tui::run(&mut runner, pattern)?
    };

    let records = save_records(records)?;
    match format {
        OutputFormat::Json => {
            let output = json!({
                "count": records.len(),
                "items": records,
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Pretty => Ok(String::new()),
    }
}

fn save_records(mut records: Vec<SessionRecord>) -> Result<Vec<SessionRecord>, BreatheError> {
    if records.is_empty() {
        return Ok(records);
    }
    let storage = HistoryStorage::new()?;
    for record in &mut records {
        storage.save(record)?;
        info!(
            pattern = %record.pattern_id,
            cycles = record.cycles,
            completed = record.completed,
            "session saved"
        );
    }
    Ok(records)
}

/// Execute the simulate command.
///
/// # Errors
///
/// Returns an error if the pattern cannot be resolved or is rejected.
pub fn simulate(
    args: &SessionArgs,
    config: &Config,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    let store = PatternStore::new()?;
    let pattern = resolve_pattern(&store, args, config)?;
    let direction = args.count.unwrap_or(config.session.count_direction);
    let steps = simulate_session(pattern.clone(), direction, config.session.scales())?;
    format_script(&pattern, direction, &steps, format)
}
