//! The breathing session state machine.
//!
//! [`SessionController`] owns the phase/count/cycle state of one session and
//! advances it one step per [`tick`](SessionController::tick). Every
//! operation returns the side effects it wants performed instead of doing
//! any I/O, so the controller is deterministic and can be driven by any
//! scheduler or test.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::effect::{EndReason, Effect, HapticKind};
use super::pattern::BreathingPattern;
use super::phase::Phase;
use crate::error::BreatheError;

/// A single transition step never visits more phases than a cycle has.
const MAX_TRANSITIONS_PER_STEP: usize = Phase::ALL.len();

/// Direction in which counts are spoken.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountDirection {
    /// Speak elapsed seconds: 1, 2, 3, 4.
    Up,
    /// Speak remaining seconds: 4, 3, 2, 1.
    #[default]
    Down,
}

impl std::fmt::Display for CountDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// Circle scales used for animation requests.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scales {
    /// Scale at rest and at the end of an exhale.
    pub rest: f32,
    /// Scale at the end of an inhale.
    pub peak: f32,
}

impl Default for Scales {
    fn default() -> Self {
        Self {
            rest: 1.0,
            peak: 1.5,
        }
    }
}

/// Observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Current phase.
    pub phase: Phase,
    /// Seconds counted within the current phase.
    pub count: u32,
    /// Completed cycles.
    pub cycle: u32,
    /// Whether a session is running (including while paused).
    pub is_active: bool,
    /// Whether ticking is suspended.
    pub is_paused: bool,
    /// Whether the current phase's prompt has been spoken.
    pub has_spoken_phase: bool,
}

/// Drives a breathing session.
#[derive(Debug, Clone)]
pub struct SessionController {
    state: SessionState,
    pattern: Option<BreathingPattern>,
    direction: CountDirection,
    scales: Scales,
    current_scale: f32,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(CountDirection::default(), Scales::default())
    }
}

impl SessionController {
    /// Create an idle controller.
    #[must_use]
    pub fn new(direction: CountDirection, scales: Scales) -> Self {
        Self {
            state: SessionState::default(),
            pattern: None,
            direction,
            scales,
            current_scale: scales.rest,
        }
    }

    /// Start a session with `pattern`.
    ///
    /// A running session is stopped first and its stop effects come first in
    /// the returned list. A pattern whose phases are all zero-length
    /// completes immediately.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::InvalidPattern` if the pattern fails
    /// validation. State is left untouched in that case.
    pub fn start(&mut self, pattern: BreathingPattern) -> Result<Vec<Effect>, BreatheError> {
        pattern.validate()?;

        let mut effects = if self.state.is_active {
            self.stop()
        } else {
            Vec::new()
        };

        info!(
            pattern = %pattern.id,
            ratio = %pattern.format_ratio(),
            repetitions = pattern.repetitions,
            direction = %self.direction,
            "breathing session started"
        );

        self.reset();
        self.state.is_active = true;
        effects.push(Effect::haptic(HapticKind::Medium));

        let degenerate = pattern.is_degenerate();
        let inhale = pattern.duration(Phase::Inhale);
        self.pattern = Some(pattern);

        if degenerate {
            warn!("pattern has no phase with a non-zero duration; completing immediately");
            self.complete(&mut effects);
        } else if inhale > 0 {
            effects.push(self.animate_for(Phase::Inhale, inhale));
        }

        Ok(effects)
    }

    /// Suspend ticking. Returns whether the state changed.
    pub fn pause(&mut self) -> bool {
        if !self.state.is_active || self.state.is_paused {
            return false;
        }
        self.state.is_paused = true;
        debug!(phase = %self.state.phase, count = self.state.count, "session paused");
        true
    }

    /// Resume ticking. Returns whether the state changed.
    pub fn resume(&mut self) -> bool {
        if !self.state.is_active || !self.state.is_paused {
            return false;
        }
        self.state.is_paused = false;
        debug!(phase = %self.state.phase, count = self.state.count, "session resumed");
        true
    }

    /// Stop the session and reset to the initial state.
    ///
    /// Stopping an idle controller only guarantees the reset.
    pub fn stop(&mut self) -> Vec<Effect> {
        let was_active = self.state.is_active;
        let cycles = self.state.cycle;
        self.reset();

        if !was_active {
            return Vec::new();
        }

        info!(cycles, "breathing session stopped");
        vec![
            Effect::haptic(HapticKind::Heavy),
            Effect::animate(self.scales.rest, 0),
            Effect::ended(EndReason::Stopped, cycles),
        ]
    }

    /// Stop, then start again with the current pattern.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::NoPattern` if no session was ever started.
    pub fn restart(&mut self) -> Result<Vec<Effect>, BreatheError> {
        let pattern = self.pattern.clone().ok_or(BreatheError::NoPattern)?;
        let mut effects = self.stop();
        effects.extend(self.start(pattern)?);
        Ok(effects)
    }

    /// Advance the session by one step.
    ///
    /// Does nothing unless the session is active and not paused.
    pub fn tick(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        if !self.state.is_active || self.state.is_paused {
            return effects;
        }

        let phase = self.state.phase;
        let Some((duration, prompt)) = self
            .pattern
            .as_ref()
            .map(|p| (p.duration(phase), p.voice_prompts.for_phase(phase).to_string()))
        else {
            return effects;
        };

        if duration == 0 {
            self.advance(&mut effects);
            return effects;
        }

        if !self.state.has_spoken_phase {
            self.state.has_spoken_phase = true;
            effects.push(Effect::speak(prompt));
            return effects;
        }

        self.state.count += 1;
        let spoken = match self.direction {
            CountDirection::Up => self.state.count,
            CountDirection::Down => duration - self.state.count + 1,
        };
        effects.push(Effect::speak(spoken.to_string()));

        if self.state.count >= duration {
            self.advance(&mut effects);
        }

        effects
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Pattern of the current (or most recent) session.
    #[must_use]
    pub const fn pattern(&self) -> Option<&BreathingPattern> {
        self.pattern.as_ref()
    }

    /// Configured count direction.
    #[must_use]
    pub const fn count_direction(&self) -> CountDirection {
        self.direction
    }

    /// Scales used for animation requests.
    #[must_use]
    pub const fn scales(&self) -> Scales {
        self.scales
    }

    /// Scale most recently requested.
    #[must_use]
    pub const fn current_scale(&self) -> f32 {
        self.current_scale
    }

    /// Configured duration of the current phase.
    #[must_use]
    pub fn phase_duration(&self) -> u32 {
        self.pattern
            .as_ref()
            .map_or(0, |p| p.duration(self.state.phase))
    }

    /// Seconds left in the current phase.
    #[must_use]
    pub fn remaining_in_phase(&self) -> u32 {
        self.phase_duration().saturating_sub(self.state.count)
    }

    /// Fraction of counted session seconds elapsed (0.0 - 1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn progress(&self) -> f64 {
        let Some(pattern) = self.pattern.as_ref() else {
            return 0.0;
        };
        if !self.state.is_active {
            return 0.0;
        }
        let total = pattern.total_seconds();
        if total == 0 {
            return 1.0;
        }

        let before_phase: u64 = pattern.ratio[..self.state.phase.index()]
            .iter()
            .map(|&d| u64::from(d))
            .sum();
        let elapsed = u64::from(self.state.cycle) * pattern.cycle_seconds()
            + before_phase
            + u64::from(self.state.count);

        (elapsed as f64 / total as f64).min(1.0)
    }

    fn reset(&mut self) {
        self.state = SessionState::default();
        self.current_scale = self.scales.rest;
    }

    /// Move to the next phase, skipping zero-length phases and ending the
    /// session when the last cycle finishes.
    fn advance(&mut self, effects: &mut Vec<Effect>) {
        let Some((ratio, repetitions)) = self.pattern.as_ref().map(|p| (p.ratio, p.repetitions))
        else {
            return;
        };

        for _ in 0..MAX_TRANSITIONS_PER_STEP {
            let next = self.state.phase.next();
            self.state.phase = next;
            self.state.count = 0;
            self.state.has_spoken_phase = false;

            if next == Phase::Inhale {
                self.state.cycle += 1;
                debug!(cycle = self.state.cycle, repetitions, "cycle complete");
                if self.state.cycle >= repetitions {
                    self.complete(effects);
                    return;
                }
            }

            let duration = ratio[next.index()];
            if duration > 0 {
                self.enter_phase(next, duration, effects);
                return;
            }
            debug!(phase = ?next, "skipping zero-length phase");
        }

        warn!("no phase with a non-zero duration; completing session");
        self.complete(effects);
    }

    fn enter_phase(&mut self, phase: Phase, duration: u32, effects: &mut Vec<Effect>) {
        debug!(phase = ?phase, duration, cycle = self.state.cycle, "entering phase");
        let kind = if phase == Phase::Inhale {
            HapticKind::Medium
        } else {
            HapticKind::Light
        };
        effects.push(Effect::haptic(kind));
        effects.push(self.animate_for(phase, duration));
    }

    fn animate_for(&mut self, phase: Phase, duration: u32) -> Effect {
        self.current_scale = match phase {
            Phase::Inhale => self.scales.peak,
            Phase::Exhale => self.scales.rest,
            Phase::Hold1 | Phase::Hold2 => self.current_scale,
        };
        Effect::animate(self.current_scale, duration)
    }

    fn complete(&mut self, effects: &mut Vec<Effect>) {
        let cycles = self.state.cycle;
        self.reset();
        info!(cycles, "breathing session completed");
        effects.push(Effect::haptic(HapticKind::Success));
        effects.push(Effect::animate(self.scales.rest, 0));
        effects.push(Effect::ended(EndReason::Completed, cycles));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(direction: CountDirection) -> SessionController {
        SessionController::new(direction, Scales::default())
    }

    fn spoken(effects: &[Effect]) -> Vec<String> {
        effects
            .iter()
            .filter_map(Effect::spoken)
            .map(ToString::to_string)
            .collect()
    }

    /// Tick until the session ends, returning every effect emitted.
    fn run_to_end(c: &mut SessionController) -> Vec<Effect> {
        let mut all = Vec::new();
        for _ in 0..10_000 {
            if !c.state().is_active {
                break;
            }
            all.extend(c.tick());
        }
        assert!(!c.state().is_active, "session did not end");
        all
    }

    #[test]
    fn test_start_resets_state_and_emits_start_effects() {
        let mut c = controller(CountDirection::Down);
        let effects = c
            .start(BreathingPattern::new("box", [4, 4, 4, 4], 2))
            .unwrap();

        assert_eq!(
            *c.state(),
            SessionState {
                phase: Phase::Inhale,
                count: 0,
                cycle: 0,
                is_active: true,
                is_paused: false,
                has_spoken_phase: false,
            }
        );
        assert_eq!(
            effects,
            vec![
                Effect::haptic(HapticKind::Medium),
                Effect::animate(1.5, 4),
            ]
        );
    }

    #[test]
    fn test_box_countdown_script() {
        let mut c = controller(CountDirection::Down);
        c.start(BreathingPattern::new("box", [4, 4, 4, 4], 1))
            .unwrap();
        let effects = run_to_end(&mut c);

        assert_eq!(
            spoken(&effects),
            vec![
                "Inhale", "4", "3", "2", "1", "Hold", "4", "3", "2", "1", "Exhale", "4", "3",
                "2", "1", "Hold", "4", "3", "2", "1",
            ]
        );
        assert!(effects.contains(&Effect::haptic(HapticKind::Success)));
        assert_eq!(
            effects.last(),
            Some(&Effect::ended(EndReason::Completed, 1))
        );
        assert_eq!(*c.state(), SessionState::default());
    }

    #[test]
    fn test_count_up_speaks_elapsed() {
        let mut c = controller(CountDirection::Up);
        c.start(BreathingPattern::new("box", [4, 4, 4, 4], 1))
            .unwrap();

        let mut words = Vec::new();
        for _ in 0..5 {
            words.extend(spoken(&c.tick()));
        }
        assert_eq!(words, vec!["Inhale", "1", "2", "3", "4"]);
        assert_eq!(c.state().phase, Phase::Hold1);
    }

    #[test]
    fn test_phase_entry_effects() {
        let mut c = controller(CountDirection::Down);
        c.start(BreathingPattern::new("relax", [2, 3, 4, 1], 2))
            .unwrap();

        // Prompt plus two counts finish the inhale.
        c.tick();
        c.tick();
        let effects = c.tick();
        assert_eq!(
            effects,
            vec![
                Effect::speak("1"),
                Effect::haptic(HapticKind::Light),
                Effect::animate(1.5, 3),
            ]
        );

        for _ in 0..3 {
            c.tick();
        }
        let effects = c.tick();
        assert_eq!(
            effects,
            vec![
                Effect::speak("1"),
                Effect::haptic(HapticKind::Light),
                Effect::animate(1.0, 4),
            ]
        );

        for _ in 0..4 {
            c.tick();
        }
        let effects = c.tick();
        assert_eq!(
            effects,
            vec![
                Effect::speak("1"),
                Effect::haptic(HapticKind::Light),
                Effect::animate(1.0, 1),
            ]
        );

        c.tick();
        let effects = c.tick();
        assert_eq!(
            effects,
            vec![
                Effect::speak("1"),
                Effect::haptic(HapticKind::Medium),
                Effect::animate(1.5, 2),
            ]
        );
        assert_eq!(c.state().cycle, 1);
    }

    #[test]
    fn test_phase_order_count_bounds_and_cycle_exactness() {
        let mut c = controller(CountDirection::Down);
        let pattern = BreathingPattern::new("mixed", [3, 1, 2, 2], 3);
        c.start(pattern.clone()).unwrap();

        let mut prev = *c.state();
        for _ in 0..10_000 {
            let effects = c.tick();
            let now = *c.state();
            if !now.is_active {
                assert!(effects.contains(&Effect::ended(EndReason::Completed, 3)));
                break;
            }

            assert!(now.count <= pattern.duration(now.phase));
            if now.phase == prev.phase {
                assert_eq!(now.cycle, prev.cycle);
            } else {
                assert_eq!(now.phase, prev.phase.next());
                assert_eq!(now.count, 0);
                let expected = if now.phase == Phase::Inhale {
                    prev.cycle + 1
                } else {
                    prev.cycle
                };
                assert_eq!(now.cycle, expected);
            }
            assert!(now.cycle < pattern.repetitions);
            prev = now;
        }
        assert!(!c.state().is_active);
    }

    #[test]
    fn test_terminates_after_repetitions() {
        let mut c = controller(CountDirection::Down);
        c.start(BreathingPattern::new("quick", [1, 1, 1, 1], 3))
            .unwrap();
        let effects = run_to_end(&mut c);

        let ended: Vec<_> = effects
            .iter()
            .filter(|e| matches!(e, Effect::Ended { .. }))
            .collect();
        assert_eq!(ended, vec![&Effect::ended(EndReason::Completed, 3)]);

        // Prompt plus one count per phase, four phases, three cycles.
        assert_eq!(spoken(&effects).len(), 2 * 4 * 3);
        assert_eq!(*c.state(), SessionState::default());
        assert!(c.tick().is_empty());
    }

    #[test]
    fn test_zero_duration_phases_are_skipped() {
        let mut c = controller(CountDirection::Down);
        c.start(BreathingPattern::new("even", [4, 0, 4, 0], 1))
            .unwrap();
        let effects = run_to_end(&mut c);

        assert_eq!(
            spoken(&effects),
            vec!["Inhale", "4", "3", "2", "1", "Exhale", "4", "3", "2", "1"]
        );
        assert!(effects.contains(&Effect::haptic(HapticKind::Success)));
    }

    #[test]
    fn test_zero_duration_skip_never_visits_hold_state_between_ticks() {
        let mut c = controller(CountDirection::Down);
        c.start(BreathingPattern::new("even", [2, 0, 2, 0], 2))
            .unwrap();

        for _ in 0..100 {
            if !c.state().is_active {
                break;
            }
            c.tick();
            assert!(!c.state().phase.is_hold() || !c.state().is_active);
        }
        assert!(!c.state().is_active);
    }

    #[test]
    fn test_zero_length_inhale_at_start() {
        let mut c = controller(CountDirection::Down);
        let effects = c
            .start(BreathingPattern::new("hold-first", [0, 2, 2, 0], 2))
            .unwrap();
        assert_eq!(effects, vec![Effect::haptic(HapticKind::Medium)]);

        // The first tick only skips the empty inhale.
        let effects = c.tick();
        assert_eq!(
            effects,
            vec![
                Effect::haptic(HapticKind::Light),
                Effect::animate(1.0, 2),
            ]
        );
        assert_eq!(c.state().phase, Phase::Hold1);

        let rest = run_to_end(&mut c);
        let words = spoken(&rest);
        assert!(!words.iter().any(|w| w == "Inhale"));
        assert_eq!(words.iter().filter(|w| *w == "Hold").count(), 2);
        assert_eq!(words.iter().filter(|w| *w == "Exhale").count(), 2);
        assert_eq!(
            rest.last(),
            Some(&Effect::ended(EndReason::Completed, 2))
        );
    }

    #[test]
    fn test_degenerate_pattern_completes_immediately() {
        let mut c = controller(CountDirection::Down);
        let effects = c
            .start(BreathingPattern::new("zero", [0, 0, 0, 0], 5))
            .unwrap();

        assert_eq!(
            effects,
            vec![
                Effect::haptic(HapticKind::Medium),
                Effect::haptic(HapticKind::Success),
                Effect::animate(1.0, 0),
                Effect::ended(EndReason::Completed, 0),
            ]
        );
        assert!(!c.state().is_active);
        assert!(c.tick().is_empty());
    }

    #[test]
    fn test_pause_keeps_count_and_does_not_respeak() {
        let mut c = controller(CountDirection::Down);
        c.start(BreathingPattern::new("box", [4, 4, 4, 4], 1))
            .unwrap();
        assert_eq!(spoken(&c.tick()), vec!["Inhale"]);
        assert_eq!(spoken(&c.tick()), vec!["4"]);

        assert!(c.pause());
        assert!(!c.pause());
        for _ in 0..5 {
            assert!(c.tick().is_empty());
        }
        assert_eq!(c.state().count, 1);
        assert!(c.state().is_paused);
        assert!(c.state().is_active);

        assert!(c.resume());
        assert!(!c.resume());
        assert_eq!(spoken(&c.tick()), vec!["3"]);
        assert_eq!(c.state().count, 2);
    }

    #[test]
    fn test_pause_requires_active_session() {
        let mut c = controller(CountDirection::Down);
        assert!(!c.pause());
        assert!(!c.resume());
    }

    #[test]
    fn test_stop_resets_and_is_idempotent() {
        let mut c = controller(CountDirection::Down);
        assert!(c.stop().is_empty());

        c.start(BreathingPattern::new("box", [1, 1, 1, 1], 3))
            .unwrap();
        for _ in 0..9 {
            c.tick();
        }
        assert_eq!(c.state().cycle, 1);
        c.pause();

        let effects = c.stop();
        assert_eq!(
            effects,
            vec![
                Effect::haptic(HapticKind::Heavy),
                Effect::animate(1.0, 0),
                Effect::ended(EndReason::Stopped, 1),
            ]
        );
        assert_eq!(*c.state(), SessionState::default());
        assert!(c.stop().is_empty());
        assert_eq!(*c.state(), SessionState::default());
    }

    #[test]
    fn test_restart_requires_pattern() {
        let mut c = controller(CountDirection::Down);
        assert!(matches!(c.restart(), Err(BreatheError::NoPattern)));
    }

    #[test]
    fn test_restart_stops_then_starts() {
        let mut c = controller(CountDirection::Down);
        c.start(BreathingPattern::new("box", [4, 4, 4, 4], 2))
            .unwrap();
        for _ in 0..7 {
            c.tick();
        }
        assert_eq!(c.state().phase, Phase::Hold1);

        let effects = c.restart().unwrap();
        assert_eq!(
            effects,
            vec![
                Effect::haptic(HapticKind::Heavy),
                Effect::animate(1.0, 0),
                Effect::ended(EndReason::Stopped, 0),
                Effect::haptic(HapticKind::Medium),
                Effect::animate(1.5, 4),
            ]
        );
        assert_eq!(c.state().phase, Phase::Inhale);
        assert!(c.state().is_active);
    }

    #[test]
    fn test_restart_after_completion_reuses_pattern() {
        let mut c = controller(CountDirection::Down);
        c.start(BreathingPattern::new("quick", [1, 0, 1, 0], 1))
            .unwrap();
        run_to_end(&mut c);

        let effects = c.restart().unwrap();
        assert_eq!(effects.first(), Some(&Effect::haptic(HapticKind::Medium)));
        assert!(c.state().is_active);
    }

    #[test]
    fn test_invalid_pattern_leaves_state_untouched() {
        let mut c = controller(CountDirection::Down);
        c.start(BreathingPattern::new("box", [4, 4, 4, 4], 2))
            .unwrap();
        c.tick();
        c.tick();
        let before = *c.state();

        let result = c.start(BreathingPattern::new("bad", [4, 4, 4, 4], 0));
        assert!(matches!(result, Err(BreatheError::InvalidPattern(_))));
        assert_eq!(*c.state(), before);
        assert_eq!(c.pattern().map(|p| p.id.as_str()), Some("box"));
    }

    #[test]
    fn test_start_while_active_stops_first() {
        let mut c = controller(CountDirection::Down);
        c.start(BreathingPattern::new("box", [4, 4, 4, 4], 2))
            .unwrap();
        c.tick();

        let effects = c
            .start(BreathingPattern::new("relax", [4, 7, 8, 0], 4))
            .unwrap();
        assert!(matches!(
            effects.first(),
            Some(Effect::Haptic {
                kind: HapticKind::Heavy
            })
        ));
        assert!(effects.contains(&Effect::ended(EndReason::Stopped, 0)));
        assert_eq!(c.pattern().map(|p| p.id.as_str()), Some("relax"));
    }

    #[test]
    fn test_custom_prompts_are_spoken() {
        let mut c = controller(CountDirection::Down);
        let prompts = crate::session::VoicePrompts::from_array([
            "Breathe in".to_string(),
            "Pause".to_string(),
            "Breathe out".to_string(),
            "Rest".to_string(),
        ]);
        c.start(BreathingPattern::new("custom", [1, 1, 1, 1], 1).with_prompts(prompts))
            .unwrap();
        let words = spoken(&run_to_end(&mut c));
        assert_eq!(
            words,
            vec!["Breathe in", "1", "Pause", "1", "Breathe out", "1", "Rest", "1"]
        );
    }

    #[test]
    fn test_progress_and_remaining() {
        let mut c = controller(CountDirection::Down);
        assert!(c.progress().abs() < f64::EPSILON);

        c.start(BreathingPattern::new("box", [4, 4, 4, 4], 1))
            .unwrap();
        c.tick();
        c.tick();
        c.tick();
        assert_eq!(c.remaining_in_phase(), 2);
        assert!((c.progress() - 2.0 / 16.0).abs() < 1e-9);
    }
}
