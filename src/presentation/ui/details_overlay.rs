//! Product details popup with reviews.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Widget, Wrap},
};

use super::command::ViewCommand;
use crate::application::{AppState, Dispatcher};
use crate::domain::entities::{MAX_RATING, MIN_RATING, average_rating};
use crate::presentation::widgets::{TextInput, price_spans};

fn stars(rating: f64) -> String {
    let full = rating.round().clamp(0.0, f64::from(MAX_RATING));
    (1..=MAX_RATING)
        .map(|i| if f64::from(i) <= full { '★' } else { '☆' })
        .collect()
}

/// State of the product details popup.
pub struct DetailsOverlayState {
    product_id: String,
    writing: bool,
    rating: u8,
    message: TextInput,
    scroll: u16,
}

impl DetailsOverlayState {
    /// Overlay for `product_id`, in browse mode.
    #[must_use]
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            writing: false,
            rating: 0,
            message: TextInput::new(" Write a review ").placeholder("Write a review..."),
            scroll: 0,
        }
    }

    /// Loads the product's reviews.
    pub fn mount(&self, dispatcher: &Dispatcher) {
        dispatcher.get_reviews(self.product_id.clone());
    }

    /// Product shown.
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Stars picked in the review form, 0 when none.
    #[must_use]
    pub const fn rating(&self) -> u8 {
        self.rating
    }

    /// Whether the review form has focus.
    #[must_use]
    pub const fn is_writing(&self) -> bool {
        self.writing
    }

    /// Clears the review form after a successful submit.
    pub fn reset_review(&mut self) {
        self.rating = 0;
        self.message.clear();
        self.set_writing(false);
    }

    fn set_writing(&mut self, writing: bool) {
        self.writing = writing;
        self.message.set_focused(writing);
    }

    /// Handles a key while the overlay is open.
    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> ViewCommand {
        if self.writing {
            match key.code {
                KeyCode::Esc => self.set_writing(false),
                KeyCode::Up | KeyCode::Char('+') => self.rating = (self.rating + 1).clamp(MIN_RATING, MAX_RATING),
                KeyCode::Down | KeyCode::Char('-') => {
                    self.rating = self.rating.saturating_sub(1).max(MIN_RATING);
                }
                KeyCode::Enter => {
                    let message = self.message.value().trim();
                    if self.rating < MIN_RATING || message.is_empty() {
                        return ViewCommand::Notice("Pick a rating and write a message first".into());
                    }
                    return ViewCommand::SubmitReview {
                        rating: self.rating,
                        message: message.to_string(),
                    };
                }
                _ => {
                    self.message.handle_key(key);
                }
            }
            return ViewCommand::Consumed;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('x') => return ViewCommand::CloseDetails,
            KeyCode::Char('r') => self.set_writing(true),
            KeyCode::Char('a') => {
                if let Some(product) = state.products.product_details() {
                    return ViewCommand::AddToCart(product.clone());
                }
            }
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
        ViewCommand::Consumed
    }
}

/// Popup with product info, reviews and the review form.
pub struct DetailsOverlay<'a> {
    state: &'a AppState,
}

impl<'a> DetailsOverlay<'a> {
    /// Renders from `state`.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl StatefulWidget for DetailsOverlay<'_> {
    type State = DetailsOverlayState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Some(product) = self.state.products.product_details() else {
            return;
        };

        let popup = area.inner(ratatui::layout::Margin::new(area.width / 10, area.height / 10));
        Clear.render(popup, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(format!(" {} ", product.title))
            .title_bottom(" a add to cart · r review · Esc close ");
        let inner = block.inner(popup);
        block.render(popup, buf);

        let [info_area, reviews_area, form_area] = Layout::vertical([
            Constraint::Length(5),
            Constraint::Fill(1),
            Constraint::Length(if state.writing { 4 } else { 0 }),
        ])
        .areas(inner);

        let reviews = self.state.review.reviews();
        let mut price = price_spans(product);
        if product.is_out_of_stock() {
            price.push(Span::styled("  Out of Stock", Style::default().fg(Color::Red)));
        }
        let info = vec![
            Line::from(product.description.clone()),
            Line::from(price),
            Line::from(vec![
                Span::styled(stars(average_rating(reviews)), Style::default().fg(Color::Yellow)),
                Span::raw(format!(" ({:.2})", average_rating(reviews))),
            ]),
        ];
        Paragraph::new(info).wrap(Wrap { trim: true }).render(info_area, buf);

        let lines: Vec<Line<'_>> = if reviews.is_empty() {
            vec![Line::styled("No Reviews", Style::default().fg(Color::DarkGray))]
        } else {
            reviews
                .iter()
                .flat_map(|review| {
                    [
                        Line::from(vec![
                            Span::styled(review.user_name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                            Span::raw(" "),
                            Span::styled(stars(f64::from(review.review_value)), Style::default().fg(Color::Yellow)),
                        ]),
                        Line::from(review.review_message.clone()),
                    ]
                })
                .collect()
        };
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::TOP).title(" Reviews "))
            .scroll((state.scroll, 0))
            .render(reviews_area, buf);

        if state.writing {
            let [rating_area, input_area] =
                Layout::vertical([Constraint::Length(1), Constraint::Length(3)]).areas(form_area);
            Paragraph::new(format!("Rating: {}  (↑/↓)", stars(f64::from(state.rating)))).render(rating_area, buf);
            (&state.message).render(input_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Product;
    use crate::presentation::ui::test_support::{StateBuilder, key};

    #[test]
    fn test_submit_requires_rating_and_message() {
        let state = StateBuilder::new().build();
        let mut overlay = DetailsOverlayState::new("p1");
        overlay.handle_key(key(KeyCode::Char('r')), &state);

        assert!(matches!(overlay.handle_key(key(KeyCode::Enter), &state), ViewCommand::Notice(_)));

        for c in "Solid".chars() {
            overlay.handle_key(key(KeyCode::Char(c)), &state);
        }
        for _ in 0..7 {
            overlay.handle_key(key(KeyCode::Up), &state);
        }
        assert_eq!(overlay.rating(), MAX_RATING);

        assert_eq!(
            overlay.handle_key(key(KeyCode::Enter), &state),
            ViewCommand::SubmitReview {
                rating: 5,
                message: "Solid".into()
            }
        );
    }

    #[test]
    fn test_rating_floor() {
        let state = StateBuilder::new().build();
        let mut overlay = DetailsOverlayState::new("p1");
        overlay.handle_key(key(KeyCode::Char('r')), &state);
        overlay.handle_key(key(KeyCode::Up), &state);
        overlay.handle_key(key(KeyCode::Down), &state);
        overlay.handle_key(key(KeyCode::Down), &state);

        assert_eq!(overlay.rating(), MIN_RATING);
    }

    #[test]
    fn test_reset_review() {
        let state = StateBuilder::new().build();
        let mut overlay = DetailsOverlayState::new("p1");
        overlay.handle_key(key(KeyCode::Char('r')), &state);
        overlay.handle_key(key(KeyCode::Up), &state);

        overlay.reset_review();

        assert_eq!(overlay.rating(), 0);
        assert!(!overlay.is_writing());
    }

    #[test]
    fn test_browse_keys() {
        let drill = Product::new("p1", "Drill").with_stock(2);
        let state = StateBuilder::new().details(drill.clone()).build();
        let mut overlay = DetailsOverlayState::new("p1");

        assert_eq!(overlay.handle_key(key(KeyCode::Char('a')), &state), ViewCommand::AddToCart(drill));
        assert_eq!(overlay.handle_key(key(KeyCode::Esc), &state), ViewCommand::CloseDetails);
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(0.0), "☆☆☆☆☆");
        assert_eq!(stars(3.6), "★★★★☆");
        assert_eq!(stars(9.0), "★★★★★");
    }
}
