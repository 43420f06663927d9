//! Config CLI command implementation.

use serde_json::json;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::BreatheError;

/// Execute the config command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be rendered.
pub fn config(
    config: &Config,
    paths: &Paths,
    cmd: &ConfigCommands,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match (cmd, format) {
        (ConfigCommands::Show, OutputFormat::Json) => Ok(serde_json::to_string_pretty(config)?),
        (ConfigCommands::Show, OutputFormat::Pretty) => {
            let yaml = config.to_yaml()?;
            Ok(yaml.trim_end().to_string())
        }
        (ConfigCommands::Path, OutputFormat::Json) => {
            let output = json!({
                "config_file": paths.config_file,
                "exists": paths.config_file.exists(),
            });
            Ok(serde_json::to_string_pretty(&output)?)
        }
        (ConfigCommands::Path, OutputFormat::Pretty) => {
            Ok(paths.config_file.display().to_string())
        }
    }
}
