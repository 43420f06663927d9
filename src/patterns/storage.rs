//! Custom pattern files.
//!
//! Each user pattern is stored as its own YAML file in `~/.breathe/patterns/`.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::BreatheError;
use crate::session::BreathingPattern;

/// Reads and writes pattern files in one directory.
pub struct PatternFiles {
    dir: PathBuf,
}

impl PatternFiles {
    /// Use `dir` for pattern files.
    #[must_use]
    pub const fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// File for `id`, or `None` if `id` cannot name a pattern file.
    fn pattern_path(&self, id: &str) -> Option<PathBuf> {
        is_valid_id(id).then(|| self.dir.join(format!("{id}.yaml")))
    }

    /// Write a pattern, replacing any file with the same id.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::InvalidPattern` if the id is not made of ASCII
    /// letters, digits, `-` and `_`, or an error if the pattern cannot be
    /// serialized or written.
    pub fn save(&self, pattern: &BreathingPattern) -> Result<(), BreatheError> {
        let path = self.pattern_path(&pattern.id).ok_or_else(|| {
            BreatheError::InvalidPattern(format!(
                "'{}': ids may only use letters, digits, '-' and '_'",
                pattern.id
            ))
        })?;
        std::fs::create_dir_all(&self.dir)?;
        let content = serde_yaml::to_string(pattern)
            .map_err(|e| BreatheError::Config(format!("Failed to serialize pattern: {e}")))?;

        std::fs::write(&path, content)?;
        debug!(path = %path.display(), "pattern saved");
        Ok(())
    }

    /// Load a pattern by id.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::NotFound` if no file exists for `id`, or a
    /// config error if the file cannot be parsed or holds another id.
    pub fn load(&self, id: &str) -> Result<BreathingPattern, BreatheError> {
        let path = self
            .pattern_path(id)
            .filter(|path| path.exists())
            .ok_or_else(|| BreatheError::NotFound(format!("Pattern '{id}'")))?;

        let content = std::fs::read_to_string(&path)?;
        let pattern: BreathingPattern = serde_yaml::from_str(&content).map_err(|e| {
            BreatheError::Config(format!("Failed to parse pattern {}: {e}", path.display()))
        })?;
        if pattern.id != id {
            return Err(BreatheError::Config(format!(
                "{} holds pattern '{}', expected '{id}'",
                path.display(),
                pattern.id
            )));
        }
        Ok(pattern)
    }

    /// Delete a pattern file.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::NotFound` if no file exists.
    pub fn delete(&self, id: &str) -> Result<(), BreatheError> {
        let path = self
            .pattern_path(id)
            .filter(|path| path.exists())
            .ok_or_else(|| BreatheError::NotFound(format!("Pattern '{id}'")))?;
        std::fs::remove_file(&path)?;
        Ok(())
    }

    /// Load every readable pattern file, sorted by id.
    ///
    /// Files that fail to parse are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn list(&self) -> Result<Vec<BreathingPattern>, BreatheError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut patterns = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.extension().is_some_and(|ext| ext == "yaml") {
                continue;
            }

            let content = std::fs::read_to_string(&path)?;
            match serde_yaml::from_str::<BreathingPattern>(&content) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable pattern"),
            }
        }

        patterns.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(patterns)
    }
}

/// Whether `id` can be used as a pattern file name as-is.
fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
