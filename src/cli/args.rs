use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::session::CountDirection;

#[derive(Parser)]
#[command(name = "breathe")]
#[command(about = "Guided breathing sessions in the terminal")]
#[command(long_about = "breathe - guided breathing in the terminal

Runs paced breathing sessions: inhale, hold, exhale, hold, repeated for a
number of cycles, with spoken counts and an animated circle.

QUICK START:
  breathe run               Box breathing (4-4-4-4) in the terminal UI
  breathe run relax         4-7-8 breathing
  breathe run --ratio 5-0-5-0 --reps 6
  breathe patterns list     Show available patterns
  breathe history           Show past sessions

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  breathe <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output (default),
    /// or 'json' for machine-readable output suitable for scripting.
    /// Falls back to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a breathing session
    ///
    /// Opens a full-screen session with an animated circle. Space pauses,
    /// `r` restarts, `s` stops, `q` quits. With --headless the session runs
    /// as plain output lines instead.
    ///
    /// # Examples
    ///
    ///   breathe run
    ///   breathe run relax --count up
    ///   breathe run --ratio 4-7-8-0 --reps 3 --headless
    #[command(alias = "r")]
    Run(RunArgs),

    /// Print every prompt, count and cue of a session without waiting
    ///
    /// Runs the session on a simulated clock and prints what would be
    /// spoken and shown, second by second.
    #[command(alias = "sim")]
    Simulate(SessionArgs),

    /// Manage breathing patterns
    #[command(alias = "p")]
    Patterns(PatternsArgs),

    /// Show past sessions
    History(HistoryArgs),

    /// Show configuration
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Example: breathe completions bash > ~/.bash_completion.d/breathe
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Which pattern a session uses and how it is counted.
#[derive(Args, Debug, Clone, Default)]
pub struct SessionArgs {
    /// Pattern id (see `breathe patterns list`)
    pub pattern: Option<String>,

    /// One-off ratio instead of a saved pattern (e.g. 4-7-8-0)
    #[arg(long, conflicts_with = "pattern")]
    pub ratio: Option<String>,

    /// Count direction within each phase
    #[arg(long, short = 'c', value_enum)]
    pub count: Option<CountDirection>,

    /// Number of cycles (overrides the pattern)
    #[arg(long, short = 'n')]
    pub reps: Option<u32>,
}

/// Arguments for `breathe run`.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    /// Print to the terminal line by line instead of opening the full-screen UI
    #[arg(long)]
    pub headless: bool,

    /// Do not speak prompts and counts
    #[arg(long)]
    pub no_voice: bool,
}

/// Arguments for pattern management.
#[derive(Args)]
pub struct PatternsArgs {
    #[command(subcommand)]
    pub command: PatternsCommands,
}

/// Pattern subcommands.
#[derive(Subcommand)]
pub enum PatternsCommands {
    /// List built-in and custom patterns
    #[command(alias = "ls")]
    List,

    /// Show pattern details
    Show {
        /// Pattern id
        id: String,
    },

    /// Save a custom pattern
    ///
    /// Example: breathe patterns add night 4-7-8-0 --reps 3 --name "Night"
    Add {
        /// Pattern id
        id: String,

        /// Seconds for inhale, hold, exhale, hold (e.g. 4-7-8-0)
        ratio: String,

        /// Number of cycles
        #[arg(long, short = 'n', default_value = "4")]
        reps: u32,

        /// Display name
        #[arg(long)]
        name: Option<String>,

        /// Short description
        #[arg(long, short = 'd')]
        description: Option<String>,

        /// Spoken prompts for inhale, hold, exhale, hold (comma separated)
        #[arg(long, value_delimiter = ',')]
        prompts: Option<Vec<String>>,
    },

    /// Remove a custom pattern
    #[command(alias = "rm")]
    Remove {
        /// Pattern id
        id: String,
    },
}

/// Arguments for session history.
#[derive(Args)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: Option<HistoryCommands>,

    /// Number of sessions to show
    #[arg(long, short = 'n', default_value = "10")]
    pub limit: usize,

    /// Only show sessions that used this pattern
    #[arg(long, short = 'p')]
    pub pattern: Option<String>,
}

/// History subcommands.
#[derive(Subcommand)]
pub enum HistoryCommands {
    /// Delete all recorded sessions
    Clear {
        /// Skip confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },
}

/// Arguments for configuration.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the path of the config file
    Path,
}
