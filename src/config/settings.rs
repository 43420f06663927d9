//! Configuration settings for breathe.
//!
//! Settings are loaded from `~/.breathe/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::config::Paths;
use crate::error::BreatheError;
use crate::patterns::DEFAULT_PATTERN_ID;
use crate::session::{CountDirection, Scales};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Session settings.
    pub session: SessionConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to `colored`'s global override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Breathing session settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Whether countdowns run down to 1 or up from 1.
    pub count_direction: CountDirection,
    /// Pattern used when none is named on the command line.
    #[serde(default = "default_pattern")]
    pub default_pattern: String,
    /// Speak prompts and counts.
    #[serde(default = "default_true")]
    pub voice: bool,
    /// External program used to speak, e.g. `say` or `espeak -s 150`.
    #[serde(default)]
    pub speech_command: Option<String>,
    /// Ring the terminal bell on phase changes.
    #[serde(default = "default_true")]
    pub haptics: bool,
    /// Circle scale at rest.
    #[serde(default = "default_rest_scale")]
    pub rest_scale: f32,
    /// Circle scale at the top of an inhale.
    #[serde(default = "default_peak_scale")]
    pub peak_scale: f32,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_pattern() -> String {
    DEFAULT_PATTERN_ID.to_string()
}

const fn default_true() -> bool {
    true
}

const fn default_rest_scale() -> f32 {
    1.0
}

const fn default_peak_scale() -> f32 {
    1.5
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            count_direction: CountDirection::default(),
            default_pattern: default_pattern(),
            voice: default_true(),
            speech_command: None,
            haptics: default_true(),
            rest_scale: default_rest_scale(),
            peak_scale: default_peak_scale(),
        }
    }
}

impl SessionConfig {
    /// Animation scales for the session circle.
    #[must_use]
    pub const fn scales(&self) -> Scales {
        Scales {
            rest: self.rest_scale,
            peak: self.peak_scale,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self, BreatheError> {
        let paths = Paths::new()?;
        Self::load_from_path(&paths.config_file)
    }

    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, BreatheError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            BreatheError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            BreatheError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, BreatheError> {
        serde_yaml::to_string(self)
            .map_err(|e| BreatheError::Config(format!("Failed to serialize config: {e}")))
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), BreatheError> {
        let contents = self.to_yaml()?;

        std::fs::write(path, contents).map_err(|e| {
            BreatheError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.general.default_output, OutputFormat::Pretty);
        assert_eq!(config.general.color, ColorSetting::Auto);
        assert_eq!(config.session.count_direction, CountDirection::Down);
        assert_eq!(config.session.default_pattern, "box");
        assert!(config.session.voice);
        assert!(config.session.haptics);
        assert!(config.session.speech_command.is_none());
        assert_eq!(config.session.scales(), Scales::default());
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let config = Config::load_from_path(&config_path).unwrap();
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let mut config = Config::default();
        config.session.count_direction = CountDirection::Up;
        config.session.speech_command = Some("espeak -s 140".to_string());

        config.save_to_path(&config_path).unwrap();
        let loaded = Config::load_from_path(&config_path).unwrap();

        assert_eq!(loaded.session.count_direction, CountDirection::Up);
        assert_eq!(
            loaded.session.speech_command.as_deref(),
            Some("espeak -s 140")
        );
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        let partial_yaml = r"
session:
  default_pattern: relax
  peak_scale: 2.0
";
        std::fs::write(&config_path, partial_yaml).unwrap();

        let config = Config::load_from_path(&config_path).unwrap();

        assert_eq!(config.session.default_pattern, "relax");
        assert!((config.session.peak_scale - 2.0).abs() < f32::EPSILON);
        assert!((config.session.rest_scale - 1.0).abs() < f32::EPSILON);
        assert!(config.session.voice);
        assert_eq!(config.general.default_output, OutputFormat::Pretty);
    }

    #[test]
    fn test_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        std::fs::write(&config_path, "session: [not, a, map]").unwrap();

        assert!(matches!(
            Config::load_from_path(&config_path),
            Err(BreatheError::Config(_))
        ));
    }
}
