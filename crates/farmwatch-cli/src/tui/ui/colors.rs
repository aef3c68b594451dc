//! Color helpers mapping dashboard semantics onto the active theme.
//!
//! | Key      | Used for |
//! |----------|----------|
//! | red      | soil and temperature Critical |
//! | orange   | any Warning, "Action Recommended" |
//! | green    | soil Optimal, pump ACTIVE, "All Systems Nominal" |
//! | blue     | temperature Optimal |
//! | cyan     | humidity Optimal and Critical |
//! | gray     | unknown sensors, pump INACTIVE |

use ratatui::style::Color;

use farmwatch_core::Banner;
use farmwatch_types::{ColorKey, PumpState, StatusLevel};

use super::theme::AppTheme;

/// Theme color for a classification color key.
#[must_use]
pub fn status_color(theme: &AppTheme, key: ColorKey) -> Color {
    match key {
        ColorKey::Red => theme.red,
        ColorKey::Orange => theme.orange,
        ColorKey::Green => theme.green,
        ColorKey::Blue => theme.blue,
        ColorKey::Cyan => theme.cyan,
        ColorKey::Gray => theme.gray,
    }
}

/// Color of a summary count column.
#[must_use]
pub fn level_color(theme: &AppTheme, level: StatusLevel) -> Color {
    match level {
        StatusLevel::Optimal => theme.green,
        StatusLevel::Warning => theme.orange,
        StatusLevel::Critical => theme.red,
    }
}

#[must_use]
pub fn pump_color(theme: &AppTheme, pump: PumpState) -> Color {
    match pump {
        PumpState::Active => theme.green,
        PumpState::Inactive => theme.gray,
    }
}

#[must_use]
pub fn banner_color(theme: &AppTheme, banner: Banner) -> Color {
    match banner {
        Banner::AllSystemsNominal => theme.green,
        Banner::ActionRecommended => theme.orange,
    }
}
