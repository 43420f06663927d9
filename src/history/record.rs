//! Records of finished breathing sessions.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{BreathingPattern, CountDirection, EndReason};

/// A finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Database ID (None if not persisted)
    pub id: Option<i64>,
    /// Pattern the session used
    pub pattern_id: String,
    /// Pattern display name at the time of the session
    pub pattern_name: String,
    /// When the session started
    pub started_at: DateTime<Utc>,
    /// When the session ended
    pub ended_at: DateTime<Utc>,
    /// Cycles breathed
    pub cycles: u32,
    /// Cycles the pattern asked for
    pub repetitions: u32,
    /// Whether every cycle was breathed
    pub completed: bool,
    /// How counts were spoken
    pub count_direction: CountDirection,
}

impl SessionRecord {
    /// Build a record for a session that just ended.
    #[must_use]
    pub fn finished(
        pattern: &BreathingPattern,
        direction: CountDirection,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        reason: EndReason,
        cycles: u32,
    ) -> Self {
        Self {
            id: None,
            pattern_id: pattern.id.clone(),
            pattern_name: pattern.display_name().to_string(),
            started_at,
            ended_at,
            cycles,
            repetitions: pattern.repetitions,
            completed: reason == EndReason::Completed,
            count_direction: direction,
        }
    }

    /// Wall-clock length of the session in seconds.
    #[must_use]
    pub fn duration_secs(&self) -> u64 {
        u64::try_from(
            self.ended_at
                .signed_duration_since(self.started_at)
                .num_seconds(),
        )
        .unwrap_or(0)
    }

    /// Get start time in local timezone.
    #[must_use]
    pub fn started_at_local(&self) -> DateTime<Local> {
        self.started_at.with_timezone(&Local)
    }
}

/// Totals over a set of sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Number of sessions
    pub sessions: usize,
    /// Sessions that ran every cycle
    pub completed: usize,
    /// Cycles across all sessions
    pub cycles: u64,
    /// Seconds spent in sessions
    pub seconds: u64,
}

impl HistorySummary {
    /// Summarize a slice of records.
    #[must_use]
    pub fn from_records(records: &[SessionRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.sessions += 1;
            if r.completed {
                acc.completed += 1;
            }
            acc.cycles += u64::from(r.cycles);
            acc.seconds += r.duration_secs();
            acc
        })
    }

    /// Fraction of sessions completed (0.0 - 1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn completion_rate(&self) -> f64 {
        if self.sessions == 0 {
            return 0.0;
        }
        self.completed as f64 / self.sessions as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(completed: bool, cycles: u32, secs: i64) -> SessionRecord {
        let start = Utc::now();
        let pattern = BreathingPattern::new("box", [4, 4, 4, 4], 4).with_name("Box Breathing");
        let reason = if completed {
            EndReason::Completed
        } else {
            EndReason::Stopped
        };
        SessionRecord::finished(
            &pattern,
            CountDirection::Down,
            start,
            start + Duration::seconds(secs),
            reason,
            cycles,
        )
    }

    #[test]
    fn test_finished_record() {
        let r = record(true, 4, 70);
        assert_eq!(r.pattern_id, "box");
        assert_eq!(r.pattern_name, "Box Breathing");
        assert_eq!(r.repetitions, 4);
        assert!(r.completed);
        assert_eq!(r.duration_secs(), 70);
    }

    #[test]
    fn test_summary() {
        let records = vec![record(true, 4, 70), record(false, 1, 20)];
        let summary = HistorySummary::from_records(&records);

        assert_eq!(summary.sessions, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.cycles, 5);
        assert_eq!(summary.seconds, 90);
        assert!((summary.completion_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_summary() {
        let summary = HistorySummary::from_records(&[]);
        assert_eq!(summary, HistorySummary::default());
        assert!(summary.completion_rate().abs() < f64::EPSILON);
    }
}
