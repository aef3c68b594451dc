//! Keyboard input handling for the TUI.
//!
//! # Key Bindings
//!
//! | Key         | Action         |
//! |-------------|----------------|
//! | `q` / `Esc` | Quit           |
//! | `t`         | Toggle theme   |
//! | `r`         | Refresh now    |
//! | `?`         | Toggle help    |
//!
//! While the help overlay is open, `Esc` and `?` close it instead of quitting.

use crossterm::event::KeyCode;

use farmwatch_core::PollerHandle;

use super::app::App;

/// User actions that can be triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Switch between dark and light theme.
    ToggleTheme,
    /// Poll the channel now.
    Refresh,
    /// Toggle the help overlay.
    ToggleHelp,
    /// No action.
    None,
}

/// Map a key press to an action.
pub fn handle_key(key: KeyCode, help_open: bool) -> Action {
    if help_open {
        return match key {
            KeyCode::Esc | KeyCode::Char('?') => Action::ToggleHelp,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    match key {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('t') => Action::ToggleTheme,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

/// Apply an action to the app. Refresh requests go to the poller.
pub fn apply_action(app: &mut App, action: Action, poller: Option<&PollerHandle>) {
    match action {
        Action::Quit => app.request_quit(),
        Action::ToggleTheme => app.toggle_theme(),
        Action::ToggleHelp => app.toggle_help(),
        Action::Refresh => {
            let accepted = poller.is_some_and(PollerHandle::refresh);
            let message = if accepted {
                "Refreshing..."
            } else {
                "Poller is not running"
            };
            app.push_status_message(message.to_string());
        }
        Action::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DashboardConfig;
    use chrono::Local;
    use farmwatch_core::Thresholds;
    use farmwatch_types::Theme;

    fn app() -> App {
        App::new(&DashboardConfig::default(), Thresholds::default(), Local::now())
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(handle_key(KeyCode::Char('q'), false), Action::Quit);
        assert_eq!(handle_key(KeyCode::Esc, false), Action::Quit);
        assert_eq!(handle_key(KeyCode::Char('t'), false), Action::ToggleTheme);
        assert_eq!(handle_key(KeyCode::Char('r'), false), Action::Refresh);
        assert_eq!(handle_key(KeyCode::Char('?'), false), Action::ToggleHelp);
        assert_eq!(handle_key(KeyCode::Char('x'), false), Action::None);
    }

    #[test]
    fn test_help_overlay_captures_esc() {
        assert_eq!(handle_key(KeyCode::Esc, true), Action::ToggleHelp);
        assert_eq!(handle_key(KeyCode::Char('?'), true), Action::ToggleHelp);
        assert_eq!(handle_key(KeyCode::Char('q'), true), Action::Quit);
        assert_eq!(handle_key(KeyCode::Char('t'), true), Action::None);
    }

    #[test]
    fn test_apply_actions() {
        let mut app = app();
        apply_action(&mut app, Action::ToggleTheme, None);
        assert_eq!(app.state.theme(), Theme::Light);

        apply_action(&mut app, Action::ToggleHelp, None);
        assert!(app.show_help);

        apply_action(&mut app, Action::Refresh, None);
        assert_eq!(app.current_status_message(), Some("Poller is not running"));

        apply_action(&mut app, Action::Quit, None);
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_refresh_reaches_poller() {
        use farmwatch_core::{MockSource, PollEvent, TelemetryPoller};
        use std::sync::Arc;
        use std::time::Duration;

        let source = Arc::new(MockSource::new());
        let (tx, mut rx) = tokio::sync::mpsc::channel(4);
        let poller = TelemetryPoller::new(source.clone(), Duration::from_secs(3600)).spawn(tx);
        assert_eq!(rx.recv().await, Some(PollEvent::Empty));

        let mut app = app();
        apply_action(&mut app, Action::Refresh, Some(&poller));
        assert_eq!(app.current_status_message(), Some("Refreshing..."));
        assert_eq!(rx.recv().await, Some(PollEvent::Empty));
        assert_eq!(source.fetch_count(), 2);

        poller.shutdown().await;
    }
}
