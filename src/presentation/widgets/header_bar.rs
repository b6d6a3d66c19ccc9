use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::presentation::ui::Tab;

/// Colors of the header bar parts.
#[allow(missing_docs)]
pub struct HeaderBarStyle {
    pub background: Style,
    pub app_name: Style,
    pub tab: Style,
    pub active_tab: Style,
    pub cart: Style,
    pub avatar: Style,
}

impl Default for HeaderBarStyle {
    fn default() -> Self {
        Self {
            background: Style::default(),
            app_name: Style::default()
                .bg(Color::Yellow)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            tab: Style::default().fg(Color::Gray),
            active_tab: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            cart: Style::default().fg(Color::White).bg(Color::DarkGray),
            avatar: Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }
}

/// Top bar: shop name, tab strip, cart count and the user's initials.
pub struct HeaderBar<'a> {
    app_name: &'a str,
    active: Option<Tab>,
    cart_count: usize,
    initials: Option<String>,
    style: HeaderBarStyle,
}

impl<'a> HeaderBar<'a> {
    /// Header with no active tab, empty cart and no user.
    #[must_use]
    pub fn new(app_name: &'a str) -> Self {
        Self {
            app_name,
            active: None,
            cart_count: 0,
            initials: None,
            style: HeaderBarStyle::default(),
        }
    }

    /// Highlights `tab`.
    #[must_use]
    pub const fn active_tab(mut self, tab: Tab) -> Self {
        self.active = Some(tab);
        self
    }

    /// Number of units in the cart.
    #[must_use]
    pub const fn cart_count(mut self, count: usize) -> Self {
        self.cart_count = count;
        self
    }

    /// Initials shown in the avatar badge.
    #[must_use]
    pub fn initials(mut self, initials: impl Into<String>) -> Self {
        let initials = initials.into();
        self.initials = (!initials.is_empty()).then_some(initials);
        self
    }

    fn right_spans(&self) -> (Vec<Span<'static>>, u16) {
        let cart = format!(" Cart {} ", self.cart_count);
        let mut spans = vec![Span::styled(cart, self.style.cart)];
        if let Some(initials) = &self.initials {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!(" {initials} "), self.style.avatar));
        }
        let width: usize = spans.iter().map(|s| s.content.width()).sum();
        (spans, u16::try_from(width).unwrap_or(u16::MAX))
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        for x in area.left()..area.right() {
            buf[(x, area.y)].set_char(' ').set_style(self.style.background);
        }

        let mut left = vec![
            Span::styled(format!(" {} ", self.app_name), self.style.app_name),
            Span::raw(" "),
        ];
        for tab in Tab::ALL {
            let style = if self.active == Some(tab) {
                self.style.active_tab
            } else {
                self.style.tab
            };
            left.push(Span::styled(format!("{} {}", tab.shortcut(), tab.title()), style));
            left.push(Span::raw("  "));
        }
        Paragraph::new(Line::from(left)).render(area, buf);

        let (right, right_width) = self.right_spans();
        if right_width < area.width {
            let right_area = Rect::new(area.right() - right_width, area.y, right_width, 1);
            Paragraph::new(Line::from(right)).render(right_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(header: HeaderBar<'_>, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        header.render(area, &mut buf);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn test_shows_cart_and_initials() {
        let line = rendered(
            HeaderBar::new("Handy Helpers").cart_count(3).initials("AL"),
            120,
        );

        assert!(line.starts_with(" Handy Helpers "));
        assert!(line.trim_end().ends_with("Cart 3   AL"));
    }

    #[test]
    fn test_no_avatar_when_signed_out() {
        let line = rendered(HeaderBar::new("Handy Helpers").initials(""), 120);
        assert!(line.trim_end().ends_with("Cart 0"));
    }
}
