//! Theme and color definitions for the TUI.

use crate::types::SeriesColor;
use ratatui::style::{Color, Modifier, Style};

/// Theme for the TUI with consistent color scheme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub danger: Color,
    pub muted: Color,
    pub cursor: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Magenta,
            danger: Color::Red,
            muted: Color::DarkGray,
            cursor: Color::Yellow,
        }
    }
}

impl Theme {
    /// Terminal colour for a chart series.
    pub fn series(&self, color: SeriesColor) -> Color {
        match color {
            SeriesColor::White => Color::White,
            SeriesColor::Red => Color::Red,
            SeriesColor::Blue => Color::Blue,
            SeriesColor::Green => Color::Green,
            SeriesColor::Gray => Color::Gray,
        }
    }

    /// Get style for titles.
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for headers.
    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.secondary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get style for errors.
    pub fn error(&self) -> Style {
        Style::default().fg(self.danger)
    }

    /// Get style for muted text.
    pub fn muted(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Get style for borders.
    pub fn border(&self) -> Style {
        Style::default().fg(self.primary)
    }

    /// Get style for the hover cursor line.
    pub fn cursor(&self) -> Style {
        Style::default().fg(self.cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_colors() {
        let theme = Theme::default();
        assert_eq!(theme.series(SeriesColor::White), Color::White);
        assert_eq!(theme.series(SeriesColor::Green), Color::Green);
        assert_eq!(theme.series(SeriesColor::Gray), Color::Gray);
    }
}
