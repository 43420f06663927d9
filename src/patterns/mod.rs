//! Breathing pattern catalogue.
//!
//! Combines the built-in presets with user patterns stored on disk.

mod presets;
mod ratio;
mod storage;

pub use presets::{is_preset, preset, presets, DEFAULT_PATTERN_ID};
pub use ratio::parse_ratio;
pub use storage::PatternFiles;

use serde::Serialize;

use crate::config::Paths;
use crate::error::BreatheError;
use crate::session::BreathingPattern;

/// Where a pattern came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternSource {
    /// Shipped with breathe
    Builtin,
    /// Saved by the user
    Custom,
}

/// A pattern with its source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternEntry {
    /// Where it came from
    pub source: PatternSource,
    /// The pattern
    #[serde(flatten)]
    pub pattern: BreathingPattern,
}

/// Supplies patterns to sessions and persists custom ones.
pub struct PatternStore {
    files: PatternFiles,
}

impl PatternStore {
    /// Open the store at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directories cannot be created.
    pub fn new() -> Result<Self, BreatheError> {
        let paths = Paths::new()?;
        paths.ensure_dirs()?;
        Ok(Self::with_files(PatternFiles::with_dir(paths.patterns)))
    }

    /// Create a store over an existing set of pattern files.
    #[must_use]
    pub const fn with_files(files: PatternFiles) -> Self {
        Self { files }
    }

    /// Built-in patterns followed by custom ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the custom pattern directory cannot be read.
    pub fn list(&self) -> Result<Vec<PatternEntry>, BreatheError> {
        let builtin = presets().into_iter().map(|pattern| PatternEntry {
            source: PatternSource::Builtin,
            pattern,
        });
        let custom = self
            .files
            .list()?
            .into_iter()
            .filter(|p| !is_preset(&p.id))
            .map(|pattern| PatternEntry {
                source: PatternSource::Custom,
                pattern,
            });
        Ok(builtin.chain(custom).collect())
    }

    /// Look up a pattern by id.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::NotFound` if no pattern has that id.
    pub fn get(&self, id: &str) -> Result<BreathingPattern, BreatheError> {
        if let Some(pattern) = preset(id) {
            return Ok(pattern);
        }
        self.files.load(id)
    }

    /// Save a custom pattern.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::InvalidPattern` if the pattern is invalid, has
    /// no non-zero phase, would shadow a built-in, or its id is not usable as
    /// a file name.
    pub fn save(&self, pattern: &BreathingPattern) -> Result<(), BreatheError> {
        pattern.validate()?;
        if pattern.is_degenerate() {
            return Err(BreatheError::InvalidPattern(format!(
                "'{}': at least one phase must last longer than 0 seconds",
                pattern.id
            )));
        }
        if is_preset(&pattern.id) {
            return Err(BreatheError::InvalidPattern(format!(
                "'{}' is a built-in pattern",
                pattern.id
            )));
        }
        self.files.save(pattern)
    }

    /// Delete a custom pattern.
    ///
    /// # Errors
    ///
    /// Returns an error for built-ins or unknown ids.
    pub fn delete(&self, id: &str) -> Result<(), BreatheError> {
        if is_preset(id) {
            return Err(BreatheError::InvalidArgument(format!(
                "'{id}' is a built-in pattern and cannot be removed"
            )));
        }
        self.files.delete(id)
    }
}
