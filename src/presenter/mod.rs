//! Presenters perform the side effects a session asks for.
//!
//! The session controller only describes what should happen. A presenter
//! speaks, pulses and animates. Presenter failures never reach the
//! controller: [`present`] logs them and moves on.

mod console;
mod recording;

pub use console::{ConsolePresenter, Speech, Voice};
pub use recording::RecordingPresenter;

use tracing::warn;

use crate::error::BreatheError;
use crate::session::{EndReason, Effect, HapticKind};

/// Something that can carry out session effects.
#[cfg_attr(test, mockall::automock)]
pub trait Presenter {
    /// Speak a phase prompt or a count.
    ///
    /// # Errors
    ///
    /// Returns an error if speech output fails.
    fn speak(&mut self, text: &str) -> Result<(), BreatheError>;

    /// Pulse the haptic engine.
    ///
    /// # Errors
    ///
    /// Returns an error if the pulse cannot be delivered.
    fn haptic(&mut self, kind: HapticKind) -> Result<(), BreatheError>;

    /// Animate the breathing circle towards `target_scale`.
    ///
    /// # Errors
    ///
    /// Returns an error if the animation cannot be started.
    fn animate(&mut self, target_scale: f32, duration_secs: u32) -> Result<(), BreatheError>;

    /// The session ended.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification cannot be shown.
    fn ended(&mut self, reason: EndReason, cycles: u32) -> Result<(), BreatheError> {
        let _ = (reason, cycles);
        Ok(())
    }
}

/// Whether spoken `text` is a count rather than a phase prompt.
#[must_use]
pub fn is_count(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Hand each effect to the presenter in order.
///
/// Failures are logged and swallowed so that one failed effect never stops
/// the ones after it.
pub fn present<P: Presenter + ?Sized>(presenter: &mut P, effects: &[Effect]) {
    for effect in effects {
        let result = match effect {
            Effect::Speak { text } => presenter.speak(text),
            Effect::Haptic { kind } => presenter.haptic(*kind),
            Effect::Animate {
                target_scale,
                duration_secs,
            } => presenter.animate(*target_scale, *duration_secs),
            Effect::Ended { reason, cycles } => presenter.ended(*reason, *cycles),
        };

        if let Err(e) = result {
            warn!(?effect, error = %e, "presenter failed; continuing");
        }
    }
}
