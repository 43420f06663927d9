//! Application state for the TUI.
//!
//! `App` is the presenter for full-screen sessions: it keeps the caption,
//! the last spoken count and the circle animation that `ui` draws.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::BreatheError;
use crate::presenter::{is_count, Presenter, Speech, Voice};
use crate::session::{EndReason, HapticKind};

const FLASH: Duration = Duration::from_millis(180);

/// A scale animation in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl Tween {
    fn at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let t = (now.saturating_duration_since(self.started).as_secs_f32()
            / self.duration.as_secs_f32())
        .clamp(0.0, 1.0);
        (self.to - self.from).mul_add(t, self.from)
    }
}

/// Application state.
pub struct App {
    /// Last phase prompt spoken.
    pub caption: String,
    /// Last count spoken in the current phase.
    pub count: Option<String>,
    /// Status message to display.
    pub status: Option<String>,
    /// How the last session ended, if it has.
    pub ended: Option<(EndReason, u32)>,
    tween: Tween,
    flash_until: Option<Instant>,
    haptics: bool,
    voice: Option<Voice>,
}

impl App {
    /// Create a new app with the circle at `rest_scale`.
    #[must_use]
    pub fn new(rest_scale: f32) -> Self {
        Self {
            caption: String::new(),
            count: None,
            status: None,
            ended: None,
            tween: Tween {
                from: rest_scale,
                to: rest_scale,
                started: Instant::now(),
                duration: Duration::ZERO,
            },
            flash_until: None,
            haptics: true,
            voice: None,
        }
    }

    /// Speak through an external program as well as showing captions.
    #[must_use]
    pub fn with_speech(mut self, speech: Option<Speech>) -> Self {
        self.voice = speech.map(Voice::new);
        self
    }

    /// Flash the circle border for haptic pulses.
    #[must_use]
    pub const fn with_haptics(mut self, enabled: bool) -> Self {
        self.haptics = enabled;
        self
    }

    /// Circle scale at `now`.
    #[must_use]
    pub fn scale_at(&self, now: Instant) -> f32 {
        self.tween.at(now)
    }

    /// Largest scale the circle is heading to or coming from.
    #[must_use]
    pub fn max_scale(&self) -> f32 {
        self.tween.from.max(self.tween.to)
    }

    /// Whether a haptic flash is showing at `now`.
    #[must_use]
    pub fn is_flashing(&self, now: Instant) -> bool {
        self.flash_until.is_some_and(|until| now < until)
    }

    /// Start animating towards `target` from wherever the circle is at `now`.
    pub fn animate_at(&mut self, target: f32, duration_secs: u32, now: Instant) {
        self.tween = Tween {
            from: self.tween.at(now),
            to: target,
            started: now,
            duration: Duration::from_secs(u64::from(duration_secs)),
        };
    }

    /// Clear the per-session display before a new session.
    pub fn reset(&mut self) {
        self.caption.clear();
        self.count = None;
        self.ended = None;
        self.status = None;
    }
}

impl Presenter for App {
    fn speak(&mut self, text: &str) -> Result<(), BreatheError> {
        if is_count(text) {
            self.count = Some(text.to_string());
        } else {
            self.caption = text.to_string();
            self.count = None;
        }
        if let Some(voice) = &mut self.voice {
            voice.say(text)?;
        }
        Ok(())
    }

    fn haptic(&mut self, kind: HapticKind) -> Result<(), BreatheError> {
        if self.haptics {
            debug!(?kind, "haptic flash");
            self.flash_until = Some(Instant::now() + FLASH);
        }
        Ok(())
    }

    fn animate(&mut self, target_scale: f32, duration_secs: u32) -> Result<(), BreatheError> {
        self.animate_at(target_scale, duration_secs, Instant::now());
        Ok(())
    }

    fn ended(&mut self, reason: EndReason, cycles: u32) -> Result<(), BreatheError> {
        self.ended = Some((reason, cycles));
        self.caption = match reason {
            EndReason::Completed => "Well done".to_string(),
            EndReason::Stopped => "Stopped".to_string(),
        };
        self.count = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_interpolates() {
        let mut app = App::new(1.0);
        let t0 = Instant::now();
        app.animate_at(1.5, 4, t0);

        assert!((app.scale_at(t0) - 1.0).abs() < 1e-6);
        assert!((app.scale_at(t0 + Duration::from_secs(2)) - 1.25).abs() < 1e-6);
        assert!((app.scale_at(t0 + Duration::from_secs(10)) - 1.5).abs() < 1e-6);
        assert!((app.max_scale() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_retarget_starts_from_current_scale() {
        let mut app = App::new(1.0);
        let t0 = Instant::now();
        app.animate_at(2.0, 2, t0);
        app.animate_at(1.0, 2, t0 + Duration::from_secs(1));

        let mid = app.scale_at(t0 + Duration::from_secs(1));
        assert!((mid - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut app = App::new(1.5);
        let t0 = Instant::now();
        app.animate_at(1.0, 0, t0);
        assert!((app.scale_at(t0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_speak_updates_caption_and_count() {
        let mut app = App::new(1.0);
        app.speak("Inhale").unwrap();
        app.speak("4").unwrap();
        assert_eq!(app.caption, "Inhale");
        assert_eq!(app.count.as_deref(), Some("4"));

        app.speak("Hold").unwrap();
        assert!(app.count.is_none());
    }

    #[test]
    fn test_empty_prompt_is_a_caption() {
        let mut app = App::new(1.0);
        app.speak("4").unwrap();
        app.speak("").unwrap();
        assert!(app.caption.is_empty());
        assert!(app.count.is_none());
    }

    #[test]
    fn test_ended_and_reset() {
        let mut app = App::new(1.0);
        app.ended(EndReason::Completed, 4).unwrap();
        assert_eq!(app.ended, Some((EndReason::Completed, 4)));
        assert_eq!(app.caption, "Well done");

        app.reset();
        assert!(app.ended.is_none());
        assert!(app.caption.is_empty());
    }

    #[test]
    fn test_haptic_flash() {
        let mut app = App::new(1.0);
        app.haptic(HapticKind::Medium).unwrap();
        assert!(app.is_flashing(Instant::now()));
        assert!(!app.is_flashing(Instant::now() + Duration::from_secs(1)));

        let mut quiet = App::new(1.0).with_haptics(false);
        quiet.haptic(HapticKind::Medium).unwrap();
        assert!(!quiet.is_flashing(Instant::now()));
    }
}
