//! Status bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Status bar severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    /// Informational.
    Info,
    /// Success.
    Success,
    /// Warning.
    Warning,
    /// Error.
    Error,
}

impl StatusLevel {
    /// Returns color for level.
    #[must_use]
    pub const fn color(self) -> Color {
        match self {
            Self::Info => Color::Cyan,
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
        }
    }
}

/// One-line bar: a message on the left, key hints on the right, and a
/// loading marker when any request is outstanding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBar {
    message: String,
    hints: String,
    level: StatusLevel,
    loading: bool,
}

impl StatusBar {
    /// Creates empty status bar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            message: String::new(),
            hints: String::new(),
            level: StatusLevel::Info,
            loading: false,
        }
    }

    /// Sets the message on the left.
    #[must_use]
    pub fn message(mut self, content: impl Into<String>) -> Self {
        self.message = content.into();
        self
    }

    /// Sets the key hints on the right.
    #[must_use]
    pub fn hints(mut self, content: impl Into<String>) -> Self {
        self.hints = content.into();
        self
    }

    /// Sets status level.
    #[must_use]
    pub const fn level(mut self, level: StatusLevel) -> Self {
        self.level = level;
        self
    }

    /// Shows the loading marker.
    #[must_use]
    pub const fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }

    /// Creates info status bar.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self::new().message(message).level(StatusLevel::Info)
    }

    /// Creates success status bar.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self::new().message(message).level(StatusLevel::Success)
    }

    /// Creates warning status bar.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new().message(message).level(StatusLevel::Warning)
    }

    /// Creates error status bar.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new().message(message).level(StatusLevel::Error)
    }

    /// Message text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.message
    }

    /// Severity of the message.
    #[must_use]
    pub const fn status_level(&self) -> StatusLevel {
        self.level
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for &StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let message_style = Style::default()
            .fg(self.level.color())
            .add_modifier(Modifier::BOLD);
        let hint_style = Style::default().fg(Color::DarkGray);

        let width = area.width as usize;
        let marker = if self.loading { "⟳ " } else { "" };
        let left_len = marker.width() + self.message.width();
        let right_len = self.hints.width();

        let mut spans = vec![
            Span::styled(marker, Style::default().fg(Color::Yellow)),
            Span::styled(&self.message, message_style),
        ];

        if left_len + right_len < width {
            spans.push(Span::raw(" ".repeat(width - left_len - right_len)));
            spans.push(Span::styled(&self.hints, hint_style));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(bar: &StatusBar, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        bar.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_hints_right_aligned() {
        let bar = StatusBar::info("Ready").hints("q quit");
        let line = rendered(&bar, 20);

        assert!(line.starts_with("Ready"));
        assert!(line.ends_with("q quit"));
    }

    #[test]
    fn test_hints_dropped_when_narrow() {
        let bar = StatusBar::error("Something failed").hints("q quit");
        let line = rendered(&bar, 18);

        assert!(line.starts_with("Something failed"));
        assert!(!line.contains("quit"));
    }

    #[test]
    fn test_loading_marker() {
        let bar = StatusBar::new().loading(true);
        assert!(rendered(&bar, 10).starts_with('⟳'));
    }
}
