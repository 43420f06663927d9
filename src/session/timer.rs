//! Tick scheduling and duration formatting.
//!
//! [`Ticker`] is the periodic scheduler that drives a session. It is a plain
//! deadline tracker: the owner arms it when a session starts or resumes,
//! disarms it when the session pauses or ends, and polls it from its event
//! loop.

use std::time::{Duration, Instant};

/// Period of the session tick.
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A periodic deadline that can be armed and disarmed.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_deadline: Option<Instant>,
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl Ticker {
    /// Create a disarmed ticker.
    #[must_use]
    pub const fn new(period: Duration) -> Self {
        Self {
            period,
            next_deadline: None,
        }
    }

    /// Arm the ticker so the first tick is due one period after `now`.
    pub fn arm(&mut self, now: Instant) {
        self.next_deadline = Some(now + self.period);
    }

    /// Cancel any pending tick.
    pub fn disarm(&mut self) {
        self.next_deadline = None;
    }

    /// Whether a tick is scheduled.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.next_deadline.is_some()
    }

    /// Configured period.
    #[must_use]
    pub const fn period(&self) -> Duration {
        self.period
    }

    /// Check whether a tick is due at `now`.
    ///
    /// Returns true at most once per call. If the caller fell behind by more
    /// than a period, the missed ticks are dropped and the next deadline is
    /// measured from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.next_deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let next = deadline + self.period;
        self.next_deadline = Some(if next <= now { now + self.period } else { next });
        true
    }

    /// Time until the next tick, or `None` when disarmed.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        self.next_deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

/// Format seconds as MM:SS.
#[must_use]
pub fn format_mmss(seconds: u64) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format seconds as a human-readable string.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    let total_minutes = seconds / 60;

    if total_minutes < 1 {
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        let rest = seconds % 60;
        if rest > 0 {
            format!(
                "{} minute{}, {} second{}",
                minutes,
                if minutes == 1 { "" } else { "s" },
                rest,
                if rest == 1 { "" } else { "s" }
            )
        } else {
            format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
        }
    }
}

/// Render a progress bar.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn render_progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0)) * width as f64) as usize;
    let empty = width.saturating_sub(filled);

    format!("[{}{}]", "█".repeat(filled), "░".repeat(empty))
}
