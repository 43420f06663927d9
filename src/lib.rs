//! breathe - guided breathing sessions in the terminal
//!
//! The core is a tick-driven state machine ([`session::SessionController`])
//! that walks a breathing pattern phase by phase and describes what to say,
//! pulse and animate as [`session::Effect`]s. Presenters carry those effects
//! out on a terminal, a full-screen UI, or a recorder.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod output;
pub mod patterns;
pub mod presenter;
pub mod session;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::BreatheError;
pub use session::{BreathingPattern, Effect, SessionController};
