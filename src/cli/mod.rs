//! Command-line interface for breathe.

pub mod args;
pub mod commands;
