//! Centralized theme and styling for the picker
//!
//! Single source of truth for the colors and styles used by the terminal
//! picker, so the font and weight stages look the same.

use ratatui::style::{Color, Modifier, Style};

// =============================================================================
// COLOR PALETTE
// =============================================================================

/// Core color palette
pub struct Colors;

impl Colors {
    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Disabled/placeholder text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Primary accent color - borders, titles
    pub const PRIMARY: Color = Color::Cyan;

    /// Selected item highlight
    pub const SELECTED_BG: Color = Color::Yellow;

    /// Selected item text (for contrast on yellow bg)
    pub const SELECTED_FG: Color = Color::Black;

    /// Marker for the font that is active right now
    pub const CURRENT: Color = Color::Green;

    /// Navigation hint color
    pub const NAV_HINT: Color = Color::DarkGray;
}

// =============================================================================
// PRE-BUILT STYLES
// =============================================================================

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    pub fn placeholder() -> Style {
        Style::default()
            .fg(Colors::FG_MUTED)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border() -> Style {
        Style::default().fg(Colors::PRIMARY)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Colors::SELECTED_BG)
            .fg(Colors::SELECTED_FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn current() -> Style {
        Style::default().fg(Colors::CURRENT)
    }

    pub fn hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }
}
