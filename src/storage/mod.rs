//! Persistence for session history.

mod database;
mod migrations;

pub use database::Database;
