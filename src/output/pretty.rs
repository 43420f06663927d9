use colored::Colorize;

use crate::history::{HistorySummary, SessionRecord};
use crate::patterns::{PatternEntry, PatternSource};
use crate::session::{
    format_duration, format_mmss, render_progress_bar, BreathingPattern, CountDirection, Effect,
    ScriptStep,
};

/// Format the pattern catalogue as a pretty table
#[must_use]
pub fn format_patterns_pretty(entries: &[PatternEntry]) -> String {
    if entries.is_empty() {
        return "Patterns (0)\n  No patterns".to_string();
    }

    let mut output = format!("Patterns ({})\n", entries.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for entry in entries {
        let p = &entry.pattern;
        let source = match entry.source {
            PatternSource::Builtin => "built-in".dimmed(),
            PatternSource::Custom => "custom".cyan(),
        };
        output.push_str(&format!(
            "{:<10} {:<22} {:<9} x{:<3} {:>6}  {}\n",
            p.id.bold(),
            p.display_name(),
            p.format_ratio().yellow(),
            p.repetitions,
            format_mmss(p.total_seconds()),
            source
        ));
    }

    output
}

/// Format a single pattern as pretty output
#[must_use]
pub fn format_pattern_pretty(entry: &PatternEntry) -> String {
    let p = &entry.pattern;
    let mut output = format!("{}\n", p.display_name().bold());
    output.push_str(&format!("  {}: {}\n", "ID".dimmed(), p.id));
    if let Some(description) = &p.description {
        output.push_str(&format!("  {}: {}\n", "About".dimmed(), description));
    }
    output.push_str(&format!(
        "  {}: {} (inhale, hold, exhale, hold)\n",
        "Ratio".dimmed(),
        p.format_ratio()
    ));
    output.push_str(&format!(
        "  {}: {} x {}\n",
        "Cycles".dimmed(),
        p.repetitions,
        format_duration(p.cycle_seconds())
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Length".dimmed(),
        format_duration(p.total_seconds())
    ));
    let prompts = &p.voice_prompts;
    output.push_str(&format!(
        "  {}: {} / {} / {} / {}\n",
        "Prompts".dimmed(),
        prompts.inhale,
        prompts.hold1,
        prompts.exhale,
        prompts.hold2
    ));
    let source = match entry.source {
        PatternSource::Builtin => "built-in",
        PatternSource::Custom => "custom",
    };
    output.push_str(&format!("  {}: {}\n", "Source".dimmed(), source));

    output
}

/// Format a simulated session as a timeline
#[must_use]
pub fn format_script_pretty(
    pattern: &BreathingPattern,
    direction: CountDirection,
    steps: &[ScriptStep],
) -> String {
    let mut output = format!(
        "{} {} x{} (counting {})\n",
        pattern.display_name().bold(),
        pattern.format_ratio().yellow(),
        pattern.repetitions,
        direction
    );
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for step in steps {
        let line = step
            .effects
            .iter()
            .map(describe_effect)
            .collect::<Vec<_>>()
            .join("  ");
        output.push_str(&format!("{} {}\n", format_mmss(step.second).dimmed(), line));
    }

    output
}

fn describe_effect(effect: &Effect) -> String {
    match effect {
        Effect::Speak { text } if text.parse::<u32>().is_ok() => text.clone(),
        Effect::Speak { text } => text.cyan().bold().to_string(),
        Effect::Haptic { kind } => format!("[{kind:?}]").to_lowercase().dimmed().to_string(),
        Effect::Animate {
            target_scale,
            duration_secs,
        } => format!("<{target_scale:.2} over {duration_secs}s>")
            .dimmed()
            .to_string(),
        Effect::Ended { reason, cycles } => format!("ended: {reason} after {cycles} cycle(s)")
            .green()
            .to_string(),
    }
}

/// Format session history as pretty output
#[must_use]
pub fn format_history_pretty(records: &[SessionRecord], summary: &HistorySummary) -> String {
    if records.is_empty() {
        return "Sessions (0)\n  No sessions recorded yet".to_string();
    }

    let mut output = format!("Sessions ({})\n", records.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for r in records {
        let icon = if r.completed { "✓".green() } else { "■".yellow() };
        let done = if r.repetitions == 0 {
            0.0
        } else {
            f64::from(r.cycles) / f64::from(r.repetitions)
        };
        output.push_str(&format!(
            "{} {}  {:<20} {} {}/{} cycles  {}\n",
            icon,
            r.started_at_local().format("%Y-%m-%d %H:%M").to_string().dimmed(),
            r.pattern_name.bold(),
            render_progress_bar(done, 8),
            r.cycles,
            r.repetitions,
            format_mmss(r.duration_secs())
        ));
    }

    output.push_str(&"─".repeat(60));
    output.push('\n');
    output.push_str(&format!(
        "{} sessions, {} completed ({:.0}%), {} cycles, {} breathing\n",
        summary.sessions,
        summary.completed,
        summary.completion_rate() * 100.0,
        summary.cycles,
        format_duration(summary.seconds)
    ));

    output
}
