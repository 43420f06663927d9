//! Dry runs of a session.
//!
//! Drives a [`SessionRunner`] with synthetic clock readings so a whole session
//! can be inspected without waiting for it.

use std::time::{Duration, Instant};

use serde::Serialize;

use super::controller::{CountDirection, Scales, SessionController};
use super::effect::Effect;
use super::pattern::BreathingPattern;
use super::phase::Phase;
use super::runner::SessionRunner;
use crate::error::BreatheError;
use crate::presenter::RecordingPresenter;

/// Effects emitted at one second of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptStep {
    /// Seconds since the session started.
    pub second: u64,
    /// Phase after the step.
    pub phase: Phase,
    /// Completed cycles after the step.
    pub cycle: u32,
    /// Effects emitted, in order.
    pub effects: Vec<Effect>,
}

/// Run `pattern` to completion and return every step that emitted something.
///
/// # Errors
///
/// Returns `BreatheError::InvalidPattern` if the pattern is rejected.
pub fn simulate(
    pattern: BreathingPattern,
    direction: CountDirection,
    scales: Scales,
) -> Result<Vec<ScriptStep>, BreatheError> {
    let limit = pattern.total_seconds() + u64::from(pattern.repetitions) * 4 + 8;
    let mut runner = SessionRunner::new(
        SessionController::new(direction, scales),
        RecordingPresenter::new(),
    );

    let t0 = Instant::now();
    runner.start(pattern, t0)?;

    let mut steps = Vec::new();
    push_step(&mut steps, &mut runner, 0);

    let mut second = 0;
    while runner.is_armed() && second < limit {
        second += 1;
        runner.poll(t0 + Duration::from_secs(second));
        push_step(&mut steps, &mut runner, second);
    }

    Ok(steps)
}

fn push_step(
    steps: &mut Vec<ScriptStep>,
    runner: &mut SessionRunner<RecordingPresenter>,
    second: u64,
) {
    let effects = runner.presenter_mut().take();
    if effects.is_empty() {
        return;
    }
    let state = runner.controller().state();
    steps.push(ScriptStep {
        second,
        phase: state.phase,
        cycle: state.cycle,
        effects,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{EndReason, HapticKind};

    fn spoken(steps: &[ScriptStep]) -> Vec<String> {
        steps
            .iter()
            .flat_map(|s| s.effects.iter().filter_map(Effect::spoken))
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_simulate_triangle_counting_up() {
        let steps = simulate(
            BreathingPattern::new("tri", [2, 1, 2, 0], 1),
            CountDirection::Up,
            Scales::default(),
        )
        .unwrap();

        assert_eq!(
            spoken(&steps),
            vec!["Inhale", "1", "2", "Hold", "1", "Exhale", "1", "2"]
        );
        let last = steps.last().unwrap();
        assert_eq!(last.second, 8);
        assert!(last
            .effects
            .contains(&Effect::ended(EndReason::Completed, 1)));
    }

    #[test]
    fn test_simulate_start_step() {
        let steps = simulate(
            BreathingPattern::new("box", [4, 4, 4, 4], 1),
            CountDirection::Down,
            Scales::default(),
        )
        .unwrap();

        assert_eq!(steps[0].second, 0);
        assert_eq!(
            steps[0].effects,
            vec![Effect::haptic(HapticKind::Medium), Effect::animate(1.5, 4)]
        );
        assert_eq!(steps[1].second, 1);
    }

    #[test]
    fn test_simulate_degenerate_pattern_ends_at_once() {
        let steps = simulate(
            BreathingPattern::new("zero", [0, 0, 0, 0], 3),
            CountDirection::Down,
            Scales::default(),
        )
        .unwrap();

        assert_eq!(steps.len(), 1);
        assert!(steps[0]
            .effects
            .contains(&Effect::ended(EndReason::Completed, 0)));
    }

    #[test]
    fn test_simulate_rejects_invalid_pattern() {
        assert!(simulate(
            BreathingPattern::new("none", [4, 4, 4, 4], 0),
            CountDirection::Down,
            Scales::default(),
        )
        .is_err());
    }
}
