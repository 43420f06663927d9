//! A presenter that records effects instead of performing them.

use super::Presenter;
use crate::error::BreatheError;
use crate::session::{EndReason, Effect, HapticKind};

/// Collects every effect it is given.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresenter {
    effects: Vec<Effect>,
}

impl RecordingPresenter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Effects recorded so far.
    #[must_use]
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Take the recorded effects, leaving the recorder empty.
    pub fn take(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Spoken text in order.
    #[must_use]
    pub fn spoken(&self) -> Vec<&str> {
        self.effects.iter().filter_map(Effect::spoken).collect()
    }
}

impl Presenter for RecordingPresenter {
    fn speak(&mut self, text: &str) -> Result<(), BreatheError> {
        self.effects.push(Effect::speak(text));
        Ok(())
    }

    fn haptic(&mut self, kind: HapticKind) -> Result<(), BreatheError> {
        self.effects.push(Effect::haptic(kind));
        Ok(())
    }

    fn animate(&mut self, target_scale: f32, duration_secs: u32) -> Result<(), BreatheError> {
        self.effects.push(Effect::animate(target_scale, duration_secs));
        Ok(())
    }

    fn ended(&mut self, reason: EndReason, cycles: u32) -> Result<(), BreatheError> {
        self.effects.push(Effect::ended(reason, cycles));
        Ok(())
    }
}
