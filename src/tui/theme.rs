//! Terminal theme detection and color definitions

use ratatui::style::Color;

use crate::services::Trend;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Primary text color (headers, body text)
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::White,
            Self::Light => Color::Black,
        }
    }

    /// Active/accent color (selected row, keybinding keys)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Secondary/muted text (separators, hints, previous prices)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::DarkGray,
            Self::Light => Color::Gray,
        }
    }

    /// Section title color
    pub fn title(self) -> Color {
        match self {
            Self::Dark => Color::Yellow,
            Self::Light => Color::Indexed(130), // dark orange/yellow (ANSI 256)
        }
    }

    /// Rising price
    pub fn price_up(self) -> Color {
        match self {
            Self::Dark => Color::Green,
            Self::Light => Color::Indexed(22), // dark green (ANSI 256)
        }
    }

    /// Falling price
    pub fn price_down(self) -> Color {
        match self {
            Self::Dark => Color::Red,
            Self::Light => Color::Indexed(124), // dark red (ANSI 256)
        }
    }

    /// Price trend line in the history chart
    pub fn chart_line(self) -> Color {
        match self {
            Self::Dark => Color::Indexed(71),  // #4CAF50-ish green (ANSI 256)
            Self::Light => Color::Indexed(28), // darker green (ANSI 256)
        }
    }

    /// Predicted price color for a trend
    pub fn trend_color(self, trend: Trend) -> Color {
        match trend {
            Trend::Up => self.price_up(),
            Trend::Down => self.price_down(),
            Trend::Neutral => self.text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_theme_colors() {
        let t = Theme::Dark;
        assert_eq!(t.text(), Color::White);
        assert_eq!(t.accent(), Color::Cyan);
        assert_eq!(t.muted(), Color::DarkGray);
        assert_eq!(t.title(), Color::Yellow);
        assert_eq!(t.price_up(), Color::Green);
        assert_eq!(t.price_down(), Color::Red);
        assert_eq!(t.chart_line(), Color::Indexed(71));
    }

    #[test]
    fn test_light_theme_colors() {
        let t = Theme::Light;
        assert_eq!(t.text(), Color::Black);
        assert_eq!(t.accent(), Color::Indexed(25));
        assert_eq!(t.muted(), Color::Gray);
        assert_eq!(t.title(), Color::Indexed(130));
        assert_eq!(t.price_up(), Color::Indexed(22));
        assert_eq!(t.price_down(), Color::Indexed(124));
        assert_eq!(t.chart_line(), Color::Indexed(28));
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn test_trend_color() {
        let t = Theme::Dark;
        assert_eq!(t.trend_color(Trend::Up), t.price_up());
        assert_eq!(t.trend_color(Trend::Down), t.price_down());
        assert_eq!(t.trend_color(Trend::Neutral), t.text());
    }
}
