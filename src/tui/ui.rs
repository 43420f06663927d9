//! UI rendering for the TUI.

use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle},
        Block, Borders, Gauge, Paragraph,
    },
    Frame,
};

use crate::session::{format_mmss, EndReason, Phase, SessionRunner};
use crate::tui::app::App;

const HELP: &str = "space:pause/resume | r:restart | s:stop | q:quit";

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, runner: &SessionRunner<App>, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Circle
            Constraint::Length(3), // Caption
            Constraint::Length(3), // Progress
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, runner, chunks[0]);
    render_circle(frame, runner, chunks[1], now);
    render_caption(frame, runner, chunks[2]);
    render_progress(frame, runner, chunks[3]);
    render_status_bar(frame, runner, chunks[4]);
}

fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Inhale => Color::Cyan,
        Phase::Exhale => Color::Blue,
        Phase::Hold1 | Phase::Hold2 => Color::Magenta,
    }
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, runner: &SessionRunner<App>, area: Rect) {
    let title = runner.controller().pattern().map_or_else(
        || " breathe ".to_string(),
        |p| {
            format!(
                " {} {} x{} ",
                p.display_name(),
                p.format_ratio(),
                p.repetitions
            )
        },
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render the breathing circle.
fn render_circle(frame: &mut Frame<'_>, runner: &SessionRunner<App>, area: Rect, now: Instant) {
    let app = runner.presenter();
    let state = runner.controller().state();
    let radius = f64::from(app.scale_at(now));
    let bound = f64::from(app.max_scale().max(runner.controller().scales().peak)) * 1.15;
    let color = if state.is_active {
        phase_color(state.phase)
    } else {
        Color::DarkGray
    };
    let border = if app.is_flashing(now) {
        Color::White
    } else {
        Color::DarkGray
    };

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .marker(Marker::Braille)
        .x_bounds([-bound, bound])
        .y_bounds([-bound, bound])
        .paint(move |ctx| {
            ctx.draw(&Circle {
                x: 0.0,
                y: 0.0,
                radius,
                color,
            });
        });

    frame.render_widget(canvas, area);
}

/// Render the spoken prompt and count.
fn render_caption(frame: &mut Frame<'_>, runner: &SessionRunner<App>, area: Rect) {
    let app = runner.presenter();
    let state = runner.controller().state();

    let mut spans = vec![Span::styled(
        app.caption.clone(),
        Style::default()
            .fg(phase_color(state.phase))
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(count) = &app.count {
        spans.push(Span::raw(format!("  {count}")));
    }
    if state.is_paused {
        spans.push(Span::styled(
            "  (paused)",
            Style::default().fg(Color::Yellow),
        ));
    }

    let caption = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(caption, area);
}

/// Render session progress.
fn render_progress(frame: &mut Frame<'_>, runner: &SessionRunner<App>, area: Rect) {
    let controller = runner.controller();
    let state = controller.state();
    let progress = match runner.presenter().ended {
        Some((EndReason::Completed, _)) if !state.is_active => 1.0,
        _ => controller.progress(),
    };

    let label = controller.pattern().map_or_else(String::new, |p| {
        let cycle = if state.is_active {
            (state.cycle + 1).min(p.repetitions)
        } else {
            runner.presenter().ended.map_or(0, |(_, cycles)| cycles)
        };
        format!(
            "cycle {cycle}/{}  {} left in {}",
            p.repetitions,
            format_mmss(u64::from(controller.remaining_in_phase())),
            state.phase.display_name().to_lowercase()
        )
    });

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(progress.clamp(0.0, 1.0))
        .label(label);
    frame.render_widget(gauge, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, runner: &SessionRunner<App>, area: Rect) {
    let app = runner.presenter();
    let text = app.status.as_deref().unwrap_or(HELP);
    let status = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}
