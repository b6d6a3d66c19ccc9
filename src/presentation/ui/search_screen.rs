//! Keyword search.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{StatefulWidget, Widget},
};

use super::command::ViewCommand;
use crate::application::{AppState, Dispatcher};
use crate::presentation::widgets::{ProductList, ProductListState, TextInput};

/// Shortest trimmed keyword that triggers a search; shorter ones reset the results.
pub const MIN_KEYWORD_LEN: usize = 4;

/// Keyword and result selection of the search view.
pub struct SearchScreenState {
    input: TextInput,
    results: ProductListState,
    in_results: bool,
}

impl SearchScreenState {
    /// Empty keyword, input focused.
    #[must_use]
    pub fn new() -> Self {
        let mut input = TextInput::new(" Search Products ").placeholder("Search by name, category or brand...");
        input.set_focused(true);
        Self {
            input,
            results: ProductListState::new(),
            in_results: false,
        }
    }

    /// Searches for the current keyword, or resets the results when it is too short.
    pub fn mount(&self, dispatcher: &Dispatcher) {
        match self.keyword_command() {
            ViewCommand::Search(keyword) => {
                dispatcher.get_search_results(keyword);
            }
            _ => dispatcher.reset_search_results(),
        }
    }

    /// Keyword as typed.
    #[must_use]
    pub fn keyword(&self) -> &str {
        self.input.value()
    }

    /// Search for the current keyword, or reset when it is too short.
    #[must_use]
    pub fn keyword_command(&self) -> ViewCommand {
        let keyword = self.input.value().trim();
        if keyword.chars().count() >= MIN_KEYWORD_LEN {
            ViewCommand::Search(keyword.to_string())
        } else {
            ViewCommand::ResetSearch
        }
    }

    fn set_in_results(&mut self, in_results: bool) {
        self.in_results = in_results;
        self.input.set_focused(!in_results);
    }

    /// Handles a key; edits to the keyword return a search or reset command.
    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> ViewCommand {
        let results = state.search.search_results();

        if !self.in_results {
            return match key.code {
                KeyCode::Down | KeyCode::Tab if !results.is_empty() => {
                    self.set_in_results(true);
                    ViewCommand::Consumed
                }
                _ => {
                    let before = self.input.value().to_string();
                    if self.input.handle_key(key) && self.input.value() != before {
                        self.results.reset();
                        self.keyword_command()
                    } else {
                        ViewCommand::Consumed
                    }
                }
            };
        }

        match key.code {
            KeyCode::Tab | KeyCode::Esc => self.set_in_results(false),
            KeyCode::Up if self.results.selected(results.len()) == Some(0) => self.set_in_results(false),
            KeyCode::Up => self.results.select_previous(results.len()),
            KeyCode::Down => self.results.select_next(results.len()),
            KeyCode::Enter => {
                if let Some(product) = self.results.selected_product(results) {
                    return ViewCommand::OpenDetails(product.id.clone());
                }
            }
            KeyCode::Char('a') => {
                if let Some(product) = self.results.selected_product(results) {
                    return ViewCommand::AddToCart(product.clone());
                }
            }
            _ => {}
        }
        ViewCommand::Consumed
    }
}

impl Default for SearchScreenState {
    fn default() -> Self {
        Self::new()
    }
}

/// Keyword input and results.
pub struct SearchScreen<'a> {
    state: &'a AppState,
}

impl<'a> SearchScreen<'a> {
    /// Renders from `state`.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl StatefulWidget for SearchScreen<'_> {
    type State = SearchScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [input_area, results_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).areas(area);

        (&state.input).render(input_area, buf);
        ProductList::new(self.state.search.search_results(), "Search Results")
            .focused(state.in_results)
            .empty_text("No result found!")
            .render(results_area, buf, &mut state.results);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Product;
    use crate::presentation::ui::test_support::{StateBuilder, key};
    use test_case::test_case;

    fn type_str(screen: &mut SearchScreenState, state: &AppState, text: &str) -> ViewCommand {
        let mut last = ViewCommand::Consumed;
        for c in text.chars() {
            last = screen.handle_key(key(KeyCode::Char(c)), state);
        }
        last
    }

    #[test]
    fn test_short_keyword_resets() {
        let state = StateBuilder::new().build();
        let mut screen = SearchScreenState::new();

        assert_eq!(type_str(&mut screen, &state, "dri"), ViewCommand::ResetSearch);
        assert_eq!(type_str(&mut screen, &state, "l"), ViewCommand::Search("dril".into()));
    }

    #[test_case("saw", false ; "three characters")]
    #[test_case("saws", true ; "four characters")]
    #[test_case(" saw ", false ; "padding does not count")]
    #[test_case("ñamé", true ; "counts characters not bytes")]
    fn test_keyword_length_threshold(keyword: &str, searches: bool) {
        let state = StateBuilder::new().build();
        let mut screen = SearchScreenState::new();

        let command = type_str(&mut screen, &state, keyword);
        assert_eq!(matches!(command, ViewCommand::Search(_)), searches);
    }

    #[test]
    fn test_keyword_is_trimmed() {
        let state = StateBuilder::new().build();
        let mut screen = SearchScreenState::new();

        assert_eq!(type_str(&mut screen, &state, "  ab  "), ViewCommand::ResetSearch);
        screen.handle_key(key(KeyCode::Backspace), &state);
        assert_eq!(screen.keyword(), "  ab ");
        assert_eq!(type_str(&mut screen, &state, "cd"), ViewCommand::Search("ab cd".into()));
    }

    #[test]
    fn test_cursor_moves_do_not_search() {
        let state = StateBuilder::new().build();
        let mut screen = SearchScreenState::new();
        type_str(&mut screen, &state, "drill");

        assert_eq!(screen.handle_key(key(KeyCode::Left), &state), ViewCommand::Consumed);
    }

    #[test]
    fn test_results_navigation() {
        let results = vec![Product::new("p1", "Drill"), Product::new("p2", "Drill bits")];
        let state = StateBuilder::new().search_results(results).build();
        let mut screen = SearchScreenState::new();

        screen.handle_key(key(KeyCode::Down), &state);
        screen.handle_key(key(KeyCode::Down), &state);
        assert_eq!(screen.handle_key(key(KeyCode::Enter), &state), ViewCommand::OpenDetails("p2".into()));

        screen.handle_key(key(KeyCode::Esc), &state);
        assert_eq!(type_str(&mut screen, &state, "saws"), ViewCommand::Search("saws".into()));
    }
}
