//! Side-effect requests emitted by the session controller.
//!
//! The controller never performs I/O. Each operation returns the effects it
//! wants performed, in order, and a presenter carries them out.

use serde::{Deserialize, Serialize};

/// Strength of a haptic pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HapticKind {
    /// Entering a hold or the exhale
    Light,
    /// Session start or entering an inhale
    Medium,
    /// Session stopped by the user
    Heavy,
    /// Session completed naturally
    Success,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// All repetitions were breathed through.
    Completed,
    /// The session was stopped before completing.
    Stopped,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// A single side-effect request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "lowercase")]
pub enum Effect {
    /// Say a phase prompt or a count.
    Speak {
        /// Text to speak
        text: String,
    },
    /// Pulse the haptic engine.
    Haptic {
        /// Pulse strength
        kind: HapticKind,
    },
    /// Animate the breathing circle to a scale.
    Animate {
        /// Target scale of the circle
        target_scale: f32,
        /// Seconds the animation should take
        duration_secs: u32,
    },
    /// The session has ended.
    Ended {
        /// Why it ended
        reason: EndReason,
        /// Cycles breathed before the end
        cycles: u32,
    },
}

impl Effect {
    /// Build a speak effect.
    #[must_use]
    pub fn speak(text: impl Into<String>) -> Self {
        Self::Speak { text: text.into() }
    }

    /// Build a haptic effect.
    #[must_use]
    pub const fn haptic(kind: HapticKind) -> Self {
        Self::Haptic { kind }
    }

    /// Build an animate effect.
    #[must_use]
    pub const fn animate(target_scale: f32, duration_secs: u32) -> Self {
        Self::Animate {
            target_scale,
            duration_secs,
        }
    }

    /// Build an ended notification.
    #[must_use]
    pub const fn ended(reason: EndReason, cycles: u32) -> Self {
        Self::Ended { reason, cycles }
    }

    /// Spoken text, if this is a speak effect.
    #[must_use]
    pub fn spoken(&self) -> Option<&str> {
        match self {
            Self::Speak { text } => Some(text),
            _ => None,
        }
    }
}
