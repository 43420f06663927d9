//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::BreatheError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Pause a running session, resume a paused one, or start again after one ended.
    TogglePause,
    /// Start the session over.
    Restart,
    /// Stop the session and stay on screen.
    Stop,
}

/// Wait up to `timeout` for a key press.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(timeout: Duration) -> Result<Option<Action>, BreatheError> {
    let ready = event::poll(timeout)
        .map_err(|e| BreatheError::Terminal(format!("Event poll failed: {e}")))?;
    if ready {
        if let Event::Key(key) =
            event::read().map_err(|e| BreatheError::Terminal(format!("Event read failed: {e}")))?
        {
            return Ok(action_for(key));
        }
    }

    Ok(None)
}

/// Map a key press to an action.
#[must_use]
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ' | 'p') | KeyCode::Enter => Some(Action::TogglePause),
        KeyCode::Char('r') => Some(Action::Restart),
        KeyCode::Char('s') => Some(Action::Stop),
        _ => None,
    }
}
