//! Terminal User Interface for the farm telemetry dashboard.
//!
//! The dashboard polls the configured channel in the background and redraws
//! the latest reading, its classification and a live clock.
//!
//! # Architecture
//!
//! - **[`App`]**: reading, theme and UI flags
//! - **[`TelemetryPoller`]**: background task that fetches on a fixed period
//!   and sends [`PollEvent`]s back to the UI loop
//! - **[`ui`]**: rendering
//! - **[`input`]**: key bindings
//!
//! The UI loop never blocks on the network; a slow or failing fetch only
//! delays the next event.

pub mod app;
pub mod input;
pub mod ui;

pub use app::App;

use std::io::{self, stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::info;

use farmwatch_core::{CLOCK_TICK, FeedClient, PollEvent, PollerHandle, TelemetryPoller};

use crate::config::Settings;

/// Buffered poll events between the poller and the UI loop.
const EVENT_BUFFER: usize = 16;

/// How long to wait for a key press before redrawing.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Enable raw mode and switch to the alternate screen.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Leave the alternate screen and restore cooked mode.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the dashboard until the user quits.
pub async fn run(settings: Settings) -> Result<()> {
    let client = FeedClient::new(settings.channel.clone()).context("Invalid channel settings")?;
    info!(channel = %settings.channel.channel_id, "Starting dashboard");

    let (event_tx, mut event_rx) = mpsc::channel::<PollEvent>(EVENT_BUFFER);
    let poller = TelemetryPoller::new(Arc::new(client), settings.dashboard.poll_interval())
        .spawn(event_tx);

    let mut app = App::new(&settings.dashboard, settings.thresholds.clone(), Local::now());

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx, &poller).await;
    restore_terminal()?;

    poller.shutdown().await;
    info!("Dashboard closed");

    result
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<PollEvent>,
    poller: &PollerHandle,
) -> Result<()> {
    let mut last_tick = Instant::now();

    while !app.should_quit() {
        app.clean_expired_messages();

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(INPUT_POLL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = input::handle_key(key.code, app.show_help);
            input::apply_action(app, action, Some(poller));
        }

        while let Ok(event) = event_rx.try_recv() {
            app.handle_poll_event(event);
        }

        if last_tick.elapsed() >= CLOCK_TICK {
            app.tick_clock(Local::now());
            last_tick = Instant::now();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;

    #[test]
    fn test_input_handling_quit() {
        assert_eq!(input::handle_key(KeyCode::Char('q'), false), input::Action::Quit);
    }

    #[test]
    fn test_input_handling_theme() {
        assert_eq!(
            input::handle_key(KeyCode::Char('t'), false),
            input::Action::ToggleTheme
        );
    }
}
