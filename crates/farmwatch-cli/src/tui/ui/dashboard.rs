//! Dashboard panels: status bar, system status, sensor cards and pump logic.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use farmwatch_core::clock::format_reading_time;
use farmwatch_types::{SensorKind, StatusLevel};

use super::colors::{banner_color, level_color, pump_color, status_color};
use super::theme::{AppTheme, BORDER_TYPE};
use crate::tui::app::App;

/// Below this width the sensor cards stack vertically.
const NARROW_WIDTH: u16 = 80;

fn panel<'a>(title: &'a str, theme: &AppTheme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_style())
        .title(format!(" {} ", title))
        .title_style(theme.title_style())
}

/// Last reading time and pump state, side by side.
pub(super) fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    let reading = app.state.reading();
    let last = Paragraph::new(vec![
        Line::from(Span::styled(" Last Sensor Reading", theme.muted_style())),
        Line::from(Span::styled(
            format!(" {}", format_reading_time(reading.last_updated)),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .block(panel_plain(theme));
    frame.render_widget(last, columns[0]);

    let pump = reading.pump();
    let pump_widget = Paragraph::new(vec![
        Line::from(Span::styled(" Pump System", theme.muted_style())),
        Line::from(Span::styled(
            format!(" ● {}", pump),
            Style::default()
                .fg(pump_color(theme, pump))
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .block(panel_plain(theme));
    frame.render_widget(pump_widget, columns[1]);
}

fn panel_plain(theme: &AppTheme) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(theme.border_style())
}

/// Banner plus the per-band counts.
pub(super) fn draw_system_status(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let summary = app.state.summary();
    let banner = summary.banner();

    let count = |n: usize, label: &str, level: StatusLevel| {
        let color = level_color(theme, level);
        vec![
            Span::styled(" ● ", Style::default().fg(color)),
            Span::styled(
                n.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" {}  ", label), theme.muted_style()),
        ]
    };

    let mut counts = Vec::new();
    counts.extend(count(summary.optimal, "Optimal", StatusLevel::Optimal));
    counts.extend(count(summary.warning, "Warnings", StatusLevel::Warning));
    counts.extend(count(summary.critical, "Critical", StatusLevel::Critical));

    let widget = Paragraph::new(vec![
        Line::from(Span::styled(
            format!(" {}", banner),
            Style::default()
                .fg(banner_color(theme, banner))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(counts),
    ])
    .block(panel("System Status", theme));
    frame.render_widget(widget, area);
}

/// The three sensor cards in display order.
pub(super) fn draw_sensor_cards(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let direction = if area.width < NARROW_WIDTH {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let cells = Layout::default()
        .direction(direction)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    for (kind, cell) in SensorKind::DISPLAYED.iter().zip(cells.iter()) {
        draw_sensor_card(frame, *cell, app, *kind, theme);
    }
}

fn draw_sensor_card(frame: &mut Frame, area: Rect, app: &App, kind: SensorKind, theme: &AppTheme) {
    let reading = app.state.reading();
    let status = app.state.status(kind);
    let color = status_color(theme, status.color);

    let mut label = vec![Span::styled(
        format!(" {}", status.level),
        Style::default().fg(color),
    )];
    if status.level.needs_attention() {
        label.push(Span::styled(" ⚠", Style::default().fg(color)));
    }

    let mut lines = vec![
        Line::from(label),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {:.1} {}", reading.value(kind), kind.unit()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ];
    if reading.is_coerced(kind) {
        lines.push(Line::from(Span::styled(
            " unreadable, shown as 0",
            theme.muted_style(),
        )));
    }

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(Style::default().fg(color))
            .title(format!(" {} ", kind.title()))
            .title_style(theme.title_style()),
    );
    frame.render_widget(card, area);
}

/// The controller's fixed pump rule.
pub(super) fn draw_pump_logic(frame: &mut Frame, area: Rect, theme: &AppTheme) {
    let rule = |action: &str, condition: &str, color: Color| {
        Line::from(vec![
            Span::styled(" ● ", Style::default().fg(color)),
            Span::styled(
                action.to_string(),
                Style::default()
                    .fg(theme.text_primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(": {}", condition), theme.muted_style()),
        ])
    };

    let widget = Paragraph::new(vec![
        rule(
            "Pump Activates (ON)",
            "Soil Moisture Critical (below 30%)",
            theme.green,
        ),
        rule(
            "Pump Deactivates (OFF)",
            "Soil Moisture Optimal (40% or higher)",
            theme.gray,
        ),
    ])
    .block(panel("Pump Automation Logic", theme));
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use chrono::Local;
    use farmwatch_core::{PollEvent, Thresholds};
    use farmwatch_types::{FeedField, Reading};
    use ratatui::backend::TestBackend;

    fn render_cards(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = app.app_theme();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_sensor_cards(frame, area, app, &theme);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_unreadable_field_is_flagged() {
        let mut app = App::new(&DashboardConfig::default(), Thresholds::default(), Local::now());
        app.handle_poll_event(PollEvent::Updated(Reading {
            soil_moisture: 0.0,
            temperature: 24.0,
            humidity: 55.0,
            pump_state: 0,
            last_updated: None,
            invalid_fields: vec![FeedField::SoilMoisture],
        }));

        let cards = render_cards(&app, 120, 8);
        assert!(cards.contains("0.0 %"));
        assert!(cards.contains("unreadable, shown as 0"));
        assert!(cards.contains("Critical ⚠"));
    }

    #[test]
    fn test_optimal_card_has_no_marker() {
        let mut app = App::new(&DashboardConfig::default(), Thresholds::default(), Local::now());
        app.handle_poll_event(PollEvent::Updated(Reading {
            soil_moisture: 45.0,
            temperature: 24.0,
            humidity: 55.0,
            pump_state: 0,
            last_updated: None,
            invalid_fields: Vec::new(),
        }));

        let cards = render_cards(&app, 120, 8);
        assert!(cards.contains("Optimal"));
        assert!(!cards.contains("⚠"));
        assert!(!cards.contains("unreadable"));
    }

    #[test]
    fn test_status_label_uses_card_color() {
        let mut app = App::new(&DashboardConfig::default(), Thresholds::default(), Local::now());
        app.handle_poll_event(PollEvent::Updated(Reading {
            soil_moisture: 45.0,
            temperature: 24.0,
            humidity: 95.0,
            pump_state: 0,
            last_updated: None,
            invalid_fields: Vec::new(),
        }));

        let (width, height) = (120, 8);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = app.app_theme();
        terminal
            .draw(|frame| {
                let area = frame.area();
                draw_sensor_cards(frame, area, &app, &theme);
            })
            .unwrap();
        let buffer = terminal.backend().buffer();

        let label = "Critical";
        let found = (0..height).find_map(|y| {
            (0..width.saturating_sub(label.len() as u16)).find(|&x| {
                label.chars().enumerate().all(|(i, ch)| {
                    buffer
                        .cell((x + i as u16, y))
                        .is_some_and(|cell| cell.symbol() == ch.to_string())
                })
            })
            .map(|x| (x, y))
        });
        let (x, y) = found.unwrap();

        // Humidity Critical is cyan, not the red used for the summary column.
        assert_eq!(buffer.cell((x, y)).unwrap().fg, theme.cyan);
        assert_ne!(theme.cyan, theme.red);
    }
}
