//! Breathing sessions.
//!
//! The session state machine and the pieces that drive it:
//! - Phases and patterns
//! - The controller that advances a session once per tick
//! - Side-effect requests for presenters
//! - The 1 Hz ticker and the runner that owns it
//! - Dry runs that collect a whole session's effects

mod controller;
mod effect;
mod pattern;
mod phase;
mod runner;
mod script;
mod timer;

pub use controller::{CountDirection, Scales, SessionController, SessionState};
pub use effect::{EndReason, Effect, HapticKind};
pub use pattern::{BreathingPattern, VoicePrompts};
pub use phase::Phase;
pub use runner::SessionRunner;
pub use script::{simulate, ScriptStep};
pub use timer::{format_duration, format_mmss, render_progress_bar, Ticker};
