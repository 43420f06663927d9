//! Breathing patterns.
//!
//! A pattern is the immutable description of a session: how long each phase
//! lasts, how many cycles to run, and what to say when each phase begins.

use serde::{Deserialize, Serialize};

use super::phase::Phase;
use crate::error::BreatheError;

/// Spoken text for each phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoicePrompts {
    /// Spoken when the inhale begins.
    pub inhale: String,
    /// Spoken when the first hold begins.
    pub hold1: String,
    /// Spoken when the exhale begins.
    pub exhale: String,
    /// Spoken when the second hold begins.
    pub hold2: String,
}

impl Default for VoicePrompts {
    fn default() -> Self {
        Self {
            inhale: "Inhale".to_string(),
            hold1: "Hold".to_string(),
            exhale: "Exhale".to_string(),
            hold2: "Hold".to_string(),
        }
    }
}

impl VoicePrompts {
    /// Build prompts from four strings in phase order.
    #[must_use]
    pub fn from_array([inhale, hold1, exhale, hold2]: [String; 4]) -> Self {
        Self {
            inhale,
            hold1,
            exhale,
            hold2,
        }
    }

    /// Get the prompt for a phase.
    #[must_use]
    pub fn for_phase(&self, phase: Phase) -> &str {
        match phase {
            Phase::Inhale => &self.inhale,
            Phase::Hold1 => &self.hold1,
            Phase::Exhale => &self.exhale,
            Phase::Hold2 => &self.hold2,
        }
    }
}

/// A breathing pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingPattern {
    /// Unique identifier (slug).
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Seconds for `[inhale, hold1, exhale, hold2]`. Zero skips the phase.
    pub ratio: [u32; 4],
    /// Number of full cycles in a session.
    pub repetitions: u32,
    /// Spoken text for each phase.
    #[serde(default)]
    pub voice_prompts: VoicePrompts,
    /// Optional description shown in listings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BreathingPattern {
    /// Create a pattern with default voice prompts.
    #[must_use]
    pub fn new(id: impl Into<String>, ratio: [u32; 4], repetitions: u32) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            ratio,
            repetitions,
            voice_prompts: VoicePrompts::default(),
            description: None,
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the voice prompts.
    #[must_use]
    pub fn with_prompts(mut self, prompts: VoicePrompts) -> Self {
        self.voice_prompts = prompts;
        self
    }

    /// Check the pattern can drive a session.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::InvalidPattern` if the id is empty or the
    /// pattern has no repetitions.
    pub fn validate(&self) -> Result<(), BreatheError> {
        if self.id.trim().is_empty() {
            return Err(BreatheError::InvalidPattern(
                "pattern id must not be empty".to_string(),
            ));
        }
        if self.repetitions == 0 {
            return Err(BreatheError::InvalidPattern(format!(
                "'{}': repetitions must be at least 1",
                self.id
            )));
        }
        Ok(())
    }

    /// Duration of a phase in seconds.
    #[must_use]
    pub const fn duration(&self, phase: Phase) -> u32 {
        self.ratio[phase.index()]
    }

    /// Whether every phase has zero duration.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.ratio.iter().all(|&d| d == 0)
    }

    /// Seconds in one full cycle.
    #[must_use]
    pub fn cycle_seconds(&self) -> u64 {
        self.ratio.iter().map(|&d| u64::from(d)).sum()
    }

    /// Counted seconds in a full session.
    #[must_use]
    pub fn total_seconds(&self) -> u64 {
        self.cycle_seconds() * u64::from(self.repetitions)
    }

    /// Display name, falling back to the id.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }

    /// Format the ratio as `4-7-8-0`.
    #[must_use]
    pub fn format_ratio(&self) -> String {
        self.ratio
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("-")
    }
}
