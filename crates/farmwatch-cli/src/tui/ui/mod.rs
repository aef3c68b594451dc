//! Main UI layout and rendering for the TUI dashboard.
//!
//! The layout, top to bottom:
//!
//! - **Header**: greeting, subtitle and theme indicator
//! - **Status bar**: last reading time and pump state
//! - **System status**: banner and per-band counts
//! - **Sensor cards**: soil moisture, humidity, temperature
//! - **Pump automation**: the firmware's ON/OFF rule
//! - **Footer**: location, live clock, owner, key hints

pub mod colors;
pub mod theme;

mod dashboard;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use farmwatch_core::clock::format_clock;
use farmwatch_types::Theme;

use super::app::App;
use theme::{AppTheme, BORDER_TYPE};

const SUBTITLE: &str = "Here's your farm's live status.";

/// Draw the complete TUI interface.
pub fn draw(frame: &mut Frame, app: &App) {
    let theme = app.app_theme();
    frame.render_widget(Block::default().style(theme.base_style()), frame.area());

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // Last reading / pump
            Constraint::Length(4), // System status
            Constraint::Min(5),    // Sensor cards
            Constraint::Length(4), // Pump automation logic
            Constraint::Length(1), // Footer
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    draw_header(frame, main_layout[0], app, &theme);
    dashboard::draw_status_bar(frame, main_layout[1], app, &theme);
    dashboard::draw_system_status(frame, main_layout[2], app, &theme);
    dashboard::draw_sensor_cards(frame, main_layout[3], app, &theme);
    dashboard::draw_pump_logic(frame, main_layout[4], &theme);
    draw_footer(frame, main_layout[5], app, &theme);
    draw_hints(frame, main_layout[6], app, &theme);

    if app.show_help {
        draw_help_overlay(frame, app, &theme);
    }
}

/// Draw the header with greeting, subtitle and theme indicator.
fn draw_header(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(theme.border_style())
        .style(theme.header_style());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(14)])
        .split(inner);

    let greeting = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {}", app.state.greeting()),
            theme.title_style(),
        )),
        Line::from(Span::styled(format!(" {}", SUBTITLE), theme.muted_style())),
    ]);
    frame.render_widget(greeting, columns[0]);

    let indicator = match app.state.theme() {
        Theme::Dark => "☾ Dark",
        Theme::Light => "☀ Light",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("{} ", indicator),
            theme.muted_style(),
        )))
        .alignment(Alignment::Right),
        columns[1],
    );
}

/// Draw the footer: location • clock • owner.
fn draw_footer(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let separator = Span::styled(" • ", Style::default().fg(theme.text_muted));
    let mut spans = Vec::new();

    if let Some(location) = app.location.as_deref() {
        spans.push(Span::styled(location.to_string(), theme.muted_style()));
        spans.push(separator.clone());
    }
    spans.push(Span::styled(format_clock(&app.state.now()), theme.muted_style()));
    if let Some(owner) = app.owner.as_deref() {
        spans.push(separator);
        spans.push(Span::styled(format!("@ {}", owner), theme.muted_style()));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}

/// Draw key hints, a transient status message, or poll health.
fn draw_hints(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let mut spans = if let Some(msg) = app.current_status_message() {
        vec![Span::styled(format!(" {}", msg), theme.muted_style())]
    } else {
        let hints = [("q", "quit"), ("t", "theme"), ("r", "refresh"), ("?", "help")];
        let mut spans = vec![Span::raw(" ")];
        for (i, (key, desc)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", Style::default().fg(theme.text_muted)));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(format!(" {}", desc), theme.muted_style()));
        }
        spans
    };

    if app.show_poll_health {
        let poll = app.state.poll();
        spans.push(Span::styled("   ", Style::default()));
        let health_color = if poll.consecutive_failures > 0 {
            theme.orange
        } else {
            theme.text_muted
        };
        let mut health = format!(
            "polls: {} ok, {} empty, {} failed",
            poll.successes, poll.empty_polls, poll.failures
        );
        if poll.consecutive_failures > 0
            && let Some(err) = poll.last_error.as_deref()
        {
            health.push_str(&format!(" (last: {})", err));
        }
        spans.push(Span::styled(health, Style::default().fg(health_color)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn shortcut_line<'a>(key: &str, desc: &str, theme: &AppTheme) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:>10} ", key), Style::default().fg(theme.orange)),
        Span::styled(desc.to_string(), Style::default().fg(theme.text_secondary)),
    ])
}

/// Draw the help overlay centered on screen.
fn draw_help_overlay(frame: &mut Frame, app: &App, theme: &AppTheme) {
    let area = frame.area();
    let width = 40.min(area.width);
    let height = 10.min(area.height);
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let help_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, help_area);

    let lines = vec![
        Line::from(""),
        shortcut_line("q / Esc", "Quit", theme),
        shortcut_line("t", "Toggle theme", theme),
        shortcut_line("r", "Refresh now", theme),
        shortcut_line("?", "Toggle help", theme),
        Line::from(""),
        Line::from(Span::styled(
            format!(" Polls every {}s", app.poll_interval.as_secs()),
            Style::default().fg(theme.text_muted),
        )),
    ];

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(Style::default().fg(theme.primary))
            .title(" Help ")
            .title_style(theme.title_style())
            .style(theme.base_style()),
    );
    frame.render_widget(help, help_area);
}
