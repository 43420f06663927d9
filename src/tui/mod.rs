//! Terminal User Interface (TUI) for breathe.
//!
//! Runs a session full-screen with an animated breathing circle.
//! Built with ratatui and crossterm.

mod app;
mod event;
mod ui;

pub use app::App;
pub use event::{action_for, Action};

use std::io;
use std::time::{Duration, Instant};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::debug;

use crate::error::BreatheError;
use crate::history::SessionRecord;
use crate::session::{BreathingPattern, SessionRunner};

/// Longest wait between frames while the circle animates.
const FRAME: Duration = Duration::from_millis(33);

/// Run `pattern` full-screen until the user quits.
///
/// Returns the records of every session that ended while the UI was open.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run, or if the
/// pattern is rejected.
pub fn run(
    runner: &mut SessionRunner<App>,
    pattern: BreathingPattern,
) -> Result<Vec<SessionRecord>, BreatheError> {
    // Setup terminal
    enable_raw_mode()
        .map_err(|e| BreatheError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| BreatheError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| BreatheError::Terminal(format!("Failed to create terminal: {e}")))?;

    let result = runner
        .start(pattern, Instant::now())
        .and_then(|()| run_app(&mut terminal, runner));

    if result.is_err() {
        runner.stop();
    }

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result?;
    Ok(runner.take_finished())
}

/// Run the main application loop.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    runner: &mut SessionRunner<App>,
) -> Result<(), BreatheError> {
    loop {
        let now = Instant::now();
        terminal
            .draw(|frame| ui::render(frame, runner, now))
            .map_err(|e| BreatheError::Terminal(format!("Failed to draw: {e}")))?;

        let timeout = runner
            .time_until_next(Instant::now())
            .map_or(FRAME, |next| next.min(FRAME));

        if let Some(action) = event::handle_events(timeout)? {
            debug!(?action, "key action");
            if apply(runner, action, Instant::now())? {
                break;
            }
        }

        runner.poll(Instant::now());
    }

    Ok(())
}

/// Apply an action to the runner. Returns whether the UI should close.
///
/// # Errors
///
/// Returns an error if restarting the session fails.
pub fn apply(
    runner: &mut SessionRunner<App>,
    action: Action,
    now: Instant,
) -> Result<bool, BreatheError> {
    match action {
        Action::Quit => {
            runner.stop();
            return Ok(true);
        }
        Action::TogglePause if runner.controller().state().is_active => {
            runner.toggle_pause(now);
        }
        Action::TogglePause | Action::Restart => {
            runner.presenter_mut().reset();
            runner.restart(now)?;
        }
        Action::Stop => {
            runner.stop();
            runner.presenter_mut().status =
                Some("stopped | space/r:start again | q:quit".to_string());
        }
    }
    Ok(false)
}
