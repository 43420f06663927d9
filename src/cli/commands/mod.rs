//! Command implementations for breathe.
//!
//! This module contains the implementation of all CLI commands.

mod completions;
mod config;
mod history;
mod patterns;
mod session;

pub use completions::completions;
pub use config::config;
pub use history::history;
pub use patterns::patterns;
pub use session::{resolve_pattern, run, simulate};
