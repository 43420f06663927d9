//! Breathing phases.

use serde::{Deserialize, Serialize};

/// One of the four phases of a breathing cycle.
///
/// Phases always advance in the fixed order
/// `Inhale -> Hold1 -> Exhale -> Hold2 -> Inhale`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Breathing in
    #[default]
    Inhale,
    /// Holding after the inhale
    Hold1,
    /// Breathing out
    Exhale,
    /// Holding after the exhale
    Hold2,
}

impl Phase {
    /// All phases in cycle order.
    pub const ALL: [Self; 4] = [Self::Inhale, Self::Hold1, Self::Exhale, Self::Hold2];

    /// Position of this phase within a cycle (and within a pattern ratio).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Inhale => 0,
            Self::Hold1 => 1,
            Self::Exhale => 2,
            Self::Hold2 => 3,
        }
    }

    /// The phase that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Inhale => Self::Hold1,
            Self::Hold1 => Self::Exhale,
            Self::Exhale => Self::Hold2,
            Self::Hold2 => Self::Inhale,
        }
    }

    /// Whether this is one of the two hold phases.
    #[must_use]
    pub const fn is_hold(self) -> bool {
        matches!(self, Self::Hold1 | Self::Hold2)
    }

    /// Get display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Inhale => "Inhale",
            Self::Hold1 | Self::Hold2 => "Hold",
            Self::Exhale => "Exhale",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_cycles_in_order() {
        assert_eq!(Phase::Inhale.next(), Phase::Hold1);
        assert_eq!(Phase::Hold1.next(), Phase::Exhale);
        assert_eq!(Phase::Exhale.next(), Phase::Hold2);
        assert_eq!(Phase::Hold2.next(), Phase::Inhale);
    }

    #[test]
    fn test_index_matches_all() {
        for (i, phase) in Phase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i);
        }
    }

    #[test]
    fn test_is_hold() {
        assert!(!Phase::Inhale.is_hold());
        assert!(Phase::Hold1.is_hold());
        assert!(!Phase::Exhale.is_hold());
        assert!(Phase::Hold2.is_hold());
    }
}
