use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use breathe::cli::args::{Cli, Commands};
use breathe::cli::commands;
use breathe::config::{Config, Paths};
use breathe::error::BreatheError;
use breathe::history::HistoryStorage;
use breathe::patterns::PatternStore;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(if e.is_user_error() { 2 } else { 1 });
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "breathe=debug",
        _ => "breathe=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), BreatheError> {
    let config = Config::load()?;
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match cli.command {
        Commands::Run(args) => commands::run(&args, &config, format)?,
        Commands::Simulate(args) => commands::simulate(&args, &config, format)?,
        Commands::Patterns(args) => {
            commands::patterns(&PatternStore::new()?, args.command, format)?
        }
        Commands::History(args) => commands::history(&HistoryStorage::new()?, args, format)?,
        Commands::Config(args) => {
            commands::config(&config, &Paths::new()?, &args.command, format)?
        }
        Commands::Completions { shell } => commands::completions(shell)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
