//! Path resolution for breathe configuration and data files.
//!
//! All breathe data is stored in `~/.breathe/`:
//! - `config.yaml` - Main configuration file
//! - `breathe.db` - SQLite database holding session history
//! - `patterns/` - Custom breathing patterns (YAML files)

use std::path::PathBuf;

use crate::error::BreatheError;

/// Paths to breathe configuration and data.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.breathe/`
    pub root: PathBuf,
    /// Config file: `~/.breathe/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.breathe/breathe.db`
    pub database: PathBuf,
    /// Patterns directory: `~/.breathe/patterns/`
    pub patterns: PathBuf,
}

impl Paths {
    /// Create paths based on the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, BreatheError> {
        let home = std::env::var("HOME").map_err(|_| {
            BreatheError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".breathe")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("breathe.db"),
            patterns: root.join("patterns"),
            root,
        }
    }

    /// Ensure all directories exist, creating them if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), BreatheError> {
        for dir in [&self.root, &self.patterns] {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    BreatheError::Config(format!(
                        "Failed to create directory {}: {e}",
                        dir.display()
                    ))
                })?;
            }
        }

        Ok(())
    }
}
