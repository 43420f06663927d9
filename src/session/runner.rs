//! Drives a [`SessionController`] from a [`Ticker`].
//!
//! The runner owns the controller, the ticker and a presenter. It keeps the
//! ticker armed only while the session is active and not paused: pause and
//! stop disarm it before they touch the controller, so a tick can never land
//! after either takes effect.

use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::debug;

use super::controller::SessionController;
use super::effect::{EndReason, Effect};
use super::pattern::BreathingPattern;
use super::timer::Ticker;
use crate::error::BreatheError;
use crate::history::SessionRecord;
use crate::presenter::{present, Presenter};

/// Owns everything needed to run one session at a time.
pub struct SessionRunner<P: Presenter> {
    controller: SessionController,
    ticker: Ticker,
    presenter: P,
    started_at: Option<DateTime<Utc>>,
    finished: Vec<SessionRecord>,
}

impl<P: Presenter> SessionRunner<P> {
    /// Create a runner around an idle controller.
    pub fn new(controller: SessionController, presenter: P) -> Self {
        Self::with_ticker(controller, presenter, Ticker::default())
    }

    /// Create a runner with a custom ticker period.
    pub const fn with_ticker(controller: SessionController, presenter: P, ticker: Ticker) -> Self {
        Self {
            controller,
            ticker,
            presenter,
            started_at: None,
            finished: Vec::new(),
        }
    }

    /// Start a session.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::InvalidPattern` if the pattern is rejected.
    pub fn start(&mut self, pattern: BreathingPattern, now: Instant) -> Result<(), BreatheError> {
        self.ticker.disarm();
        let effects = self.controller.start(pattern)?;
        self.dispatch(&effects);
        self.mark_started();
        self.rearm(now);
        Ok(())
    }

    /// Pause ticking.
    pub fn pause(&mut self) {
        self.ticker.disarm();
        self.controller.pause();
    }

    /// Resume ticking; the next tick is due one period after `now`.
    pub fn resume(&mut self, now: Instant) {
        if self.controller.resume() {
            self.rearm(now);
        }
    }

    /// Pause if running, resume if paused.
    pub fn toggle_pause(&mut self, now: Instant) {
        if self.controller.state().is_paused {
            self.resume(now);
        } else {
            self.pause();
        }
    }

    /// Stop the session.
    pub fn stop(&mut self) {
        self.ticker.disarm();
        let effects = self.controller.stop();
        self.dispatch(&effects);
    }

    /// Stop, then start again with the same pattern.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::NoPattern` if nothing was ever started.
    pub fn restart(&mut self, now: Instant) -> Result<(), BreatheError> {
        self.ticker.disarm();
        let effects = self.controller.restart()?;
        self.dispatch(&effects);
        self.mark_started();
        self.rearm(now);
        Ok(())
    }

    /// Tick the controller if the ticker is due. Returns whether it ticked.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        let effects = self.controller.tick();
        self.dispatch(&effects);
        if !self.is_running() {
            self.ticker.disarm();
        }
        true
    }

    /// Block, ticking once per period, until the session ends.
    pub fn run_to_completion(&mut self) {
        while let Some(wait) = self.ticker.time_until_next(Instant::now()) {
            std::thread::sleep(wait);
            self.poll(Instant::now());
        }
    }

    /// Whether a session is active and not paused.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        let state = self.controller.state();
        state.is_active && !state.is_paused
    }

    /// Time until the next tick, if one is scheduled.
    #[must_use]
    pub fn time_until_next(&self, now: Instant) -> Option<std::time::Duration> {
        self.ticker.time_until_next(now)
    }

    /// Whether a tick is scheduled.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.ticker.is_armed()
    }

    /// The controller.
    #[must_use]
    pub const fn controller(&self) -> &SessionController {
        &self.controller
    }

    /// The presenter.
    #[must_use]
    pub const fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Take the records of sessions that have ended since the last call.
    pub fn take_finished(&mut self) -> Vec<SessionRecord> {
        std::mem::take(&mut self.finished)
    }

    fn mark_started(&mut self) {
        if self.controller.state().is_active {
            self.started_at = Some(Utc::now());
        }
    }

    fn rearm(&mut self, now: Instant) {
        if self.is_running() {
            self.ticker.arm(now);
        } else {
            self.ticker.disarm();
        }
    }

    fn dispatch(&mut self, effects: &[Effect]) {
        for effect in effects {
            if let Effect::Ended { reason, cycles } = effect {
                self.record_end(*reason, *cycles);
            }
        }
        present(&mut self.presenter, effects);
    }

    fn record_end(&mut self, reason: EndReason, cycles: u32) {
        let started_at = self.started_at.take().unwrap_or_else(Utc::now);
        let Some(pattern) = self.controller.pattern() else {
            return;
        };
        let record = SessionRecord::finished(
            pattern,
            self.controller.count_direction(),
            started_at,
            Utc::now(),
            reason,
            cycles,
        );
        debug!(pattern = %record.pattern_id, %reason, cycles, "session finished");
        self.finished.push(record);
    }
}
