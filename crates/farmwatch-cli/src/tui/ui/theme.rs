//! Dark and light palettes for the TUI.
//!
//! Colors follow the Tailwind CSS palette so both themes keep the same
//! red / orange / green / blue / cyan status hues at readable contrast.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

/// Application theme with all UI colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppTheme {
    // Primary colors
    pub primary: Color,

    // Status colors
    pub red: Color,
    pub orange: Color,
    pub green: Color,
    pub blue: Color,
    pub cyan: Color,
    pub gray: Color,

    // Text colors
    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    // Border colors
    pub border: Color,

    // Background colors
    pub bg: Color,
    pub bg_header: Color,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl AppTheme {
    /// Dark theme using Tailwind-inspired colors.
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Rgb(16, 185, 129), // emerald-500

            red: Color::Rgb(248, 113, 113),    // red-400
            orange: Color::Rgb(251, 146, 60),  // orange-400
            green: Color::Rgb(74, 222, 128),   // green-400
            blue: Color::Rgb(96, 165, 250),    // blue-400
            cyan: Color::Rgb(34, 211, 238),    // cyan-400
            gray: Color::Rgb(100, 116, 139),   // slate-500

            text_primary: Color::Rgb(248, 250, 252),   // slate-50
            text_secondary: Color::Rgb(148, 163, 184), // slate-400
            text_muted: Color::Rgb(100, 116, 139),     // slate-500

            border: Color::Rgb(51, 65, 85), // slate-700

            bg: Color::Rgb(15, 23, 42),        // slate-900
            bg_header: Color::Rgb(30, 41, 59), // slate-800
        }
    }

    /// Light theme using Tailwind-inspired colors.
    #[must_use]
    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(5, 150, 105), // emerald-600

            // Status colors (darker for readability)
            red: Color::Rgb(220, 38, 38),    // red-600
            orange: Color::Rgb(234, 88, 12), // orange-600
            green: Color::Rgb(22, 163, 74),  // green-600
            blue: Color::Rgb(37, 99, 235),   // blue-600
            cyan: Color::Rgb(8, 145, 178),   // cyan-600
            gray: Color::Rgb(100, 116, 139), // slate-500

            // Text (dark for light backgrounds)
            text_primary: Color::Rgb(30, 41, 59),    // slate-800
            text_secondary: Color::Rgb(71, 85, 105), // slate-600
            text_muted: Color::Rgb(148, 163, 184),   // slate-400

            border: Color::Rgb(203, 213, 225), // slate-300

            bg: Color::Rgb(241, 245, 249),        // slate-100
            bg_header: Color::Rgb(255, 255, 255), // white
        }
    }

    // Style helpers

    /// Style for panel borders.
    #[inline]
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for titles.
    #[inline]
    #[must_use]
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for header/app bar.
    #[inline]
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default().bg(self.bg_header).fg(self.text_primary)
    }

    /// Base style for the whole screen.
    #[inline]
    #[must_use]
    pub fn base_style(&self) -> Style {
        Style::default().bg(self.bg).fg(self.text_primary)
    }

    #[inline]
    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }
}

/// Default border type for all blocks (rounded for modern look).
pub const BORDER_TYPE: BorderType = BorderType::Rounded;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_themes_differ() {
        assert_ne!(AppTheme::dark(), AppTheme::light());
        assert_eq!(AppTheme::default(), AppTheme::dark());
    }

    #[test]
    fn test_text_contrasts_with_background() {
        for theme in [AppTheme::dark(), AppTheme::light()] {
            assert_ne!(theme.text_primary, theme.bg);
            assert_ne!(theme.text_primary, theme.bg_header);
        }
    }
}
