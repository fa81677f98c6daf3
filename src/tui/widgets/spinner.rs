//! Loading spinner widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// Spinner animation frames
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// App branding
const APP_NAME: &str = "pricedash";
const TAGLINE: &str = "Predicted prices & price trends";

/// What is being loaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingStage {
    Products,
    History,
}

impl LoadingStage {
    pub fn message(self) -> &'static str {
        match self {
            Self::Products => "Fetching predicted prices...",
            Self::History => "Fetching price history...",
        }
    }
}

/// Loading spinner widget
pub struct Spinner {
    frame: usize,
    stage: LoadingStage,
    theme: Theme,
}

impl Spinner {
    pub fn new(frame: usize, stage: LoadingStage, theme: Theme) -> Self {
        Self {
            frame,
            stage,
            theme,
        }
    }

    /// Get the current spinner character
    pub fn current_char(&self) -> char {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    /// Advance to next frame, returning the new frame index
    pub fn next_frame(frame: usize) -> usize {
        (frame + 1) % SPINNER_FRAMES.len()
    }

    fn render_spinner_line(&self, area: Rect, y: u16, buf: &mut Buffer) {
        let spinner_text = format!("{} {}", self.current_char(), self.stage.message());
        let width = spinner_text.chars().count() as u16;
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        buf.set_string(x, y, &spinner_text, Style::default().fg(self.theme.accent()));
    }
}

impl Widget for Spinner {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width < 30 {
            return;
        }

        let center_y = area.y + area.height / 2;

        // Inside the trend modal only the spinner line fits
        if self.stage == LoadingStage::History || area.height < 5 {
            self.render_spinner_line(area, center_y, buf);
            return;
        }

        // 4 lines: name, tagline, empty, spinner
        let name_y = center_y.saturating_sub(2);
        let name_x = area.x + (area.width.saturating_sub(APP_NAME.len() as u16)) / 2;
        buf.set_string(
            name_x,
            name_y,
            APP_NAME,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        );

        let tag_y = name_y + 1;
        let tag_x = area.x + (area.width.saturating_sub(TAGLINE.len() as u16)) / 2;
        buf.set_string(tag_x, tag_y, TAGLINE, Style::default().fg(self.theme.muted()));

        self.render_spinner_line(area, tag_y + 2, buf);
    }
}
