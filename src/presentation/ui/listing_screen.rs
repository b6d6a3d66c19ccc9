//! Product listing with filters and sort.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, StatefulWidget, Widget},
};

use super::command::ViewCommand;
use crate::application::{AppState, Dispatcher};
use crate::domain::filter::{FilterOption, FilterParams, FilterSection, SortOption};
use crate::presentation::widgets::{ProductList, ProductListState};

const SECTIONS: [FilterSection; 2] = [FilterSection::Category, FilterSection::Brand];

/// Region of the listing view receiving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFocus {
    /// Filter checkboxes.
    Filters,
    /// Product list.
    Products,
}

/// Filters, sort and selection of the listing view.
pub struct ListingScreenState {
    filters: FilterParams,
    sort: SortOption,
    focus: ListingFocus,
    filter_cursor: usize,
    products: ProductListState,
}

/// Every filter row in display order.
fn filter_rows() -> impl Iterator<Item = (FilterSection, &'static FilterOption)> {
    SECTIONS
        .into_iter()
        .flat_map(|section| section.options().iter().map(move |option| (section, option)))
}

impl ListingScreenState {
    /// Listing starting with `filters` selected.
    #[must_use]
    pub fn new(filters: FilterParams) -> Self {
        Self {
            filters,
            sort: SortOption::default(),
            focus: ListingFocus::Products,
            filter_cursor: 0,
            products: ProductListState::new(),
        }
    }

    /// Fetches the listing for the current filters and sort.
    pub fn mount(&self, dispatcher: &Dispatcher) {
        dispatcher.fetch_all_filtered_products(self.filters.clone(), self.sort);
    }

    /// Selected filters.
    #[must_use]
    pub const fn filters(&self) -> &FilterParams {
        &self.filters
    }

    /// Current sort.
    #[must_use]
    pub const fn sort(&self) -> SortOption {
        self.sort
    }

    fn refetch(&mut self) -> ViewCommand {
        self.products.reset();
        ViewCommand::FetchListing {
            filters: self.filters.clone(),
            sort: self.sort,
        }
    }

    /// Handles a key; any filter or sort change re-fetches the listing.
    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> ViewCommand {
        let products = state.products.product_list();

        match (self.focus, key.code) {
            (_, KeyCode::Tab) => {
                self.focus = match self.focus {
                    ListingFocus::Filters => ListingFocus::Products,
                    ListingFocus::Products => ListingFocus::Filters,
                };
            }
            (_, KeyCode::Char('s')) => {
                self.sort = self.sort.next();
                return self.refetch();
            }
            (_, KeyCode::Char('c')) if !self.filters.is_empty() => {
                self.filters.clear();
                return self.refetch();
            }
            (ListingFocus::Filters, KeyCode::Up) => {
                self.filter_cursor = self.filter_cursor.saturating_sub(1);
            }
            (ListingFocus::Filters, KeyCode::Down) => {
                self.filter_cursor = (self.filter_cursor + 1).min(filter_rows().count() - 1);
            }
            (ListingFocus::Filters, KeyCode::Enter | KeyCode::Char(' ')) => {
                if let Some((section, option)) = filter_rows().nth(self.filter_cursor) {
                    self.filters.toggle(section, option.id);
                    return self.refetch();
                }
            }
            (ListingFocus::Products, KeyCode::Up) => self.products.select_previous(products.len()),
            (ListingFocus::Products, KeyCode::Down) => self.products.select_next(products.len()),
            (ListingFocus::Products, KeyCode::Enter) => {
                if let Some(product) = self.products.selected_product(products) {
                    return ViewCommand::OpenDetails(product.id.clone());
                }
            }
            (ListingFocus::Products, KeyCode::Char('a')) => {
                if let Some(product) = self.products.selected_product(products) {
                    return ViewCommand::AddToCart(product.clone());
                }
            }
            _ => {}
        }
        ViewCommand::Consumed
    }
}

/// Filter sidebar and product list.
pub struct ListingScreen<'a> {
    state: &'a AppState,
}

impl<'a> ListingScreen<'a> {
    /// Renders from `state`.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl StatefulWidget for ListingScreen<'_> {
    type State = ListingScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [filters_area, products_area] =
            Layout::horizontal([Constraint::Length(30), Constraint::Fill(1)]).areas(area);

        let border = if state.focus == ListingFocus::Filters {
            Color::Cyan
        } else {
            Color::Gray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Filters ");

        let mut lines = Vec::new();
        let mut row = 0;
        for section in SECTIONS {
            lines.push(Line::styled(section.title(), Style::default().add_modifier(Modifier::BOLD)));
            for option in section.options() {
                let mark = if state.filters.is_selected(section, option.id) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let style = if state.focus == ListingFocus::Filters && row == state.filter_cursor {
                    Style::default().bg(Color::DarkGray)
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    Span::styled(mark, Style::default().fg(Color::Yellow)),
                    Span::styled(format!(" {}", option.label), style),
                ]));
                row += 1;
            }
        }
        Paragraph::new(lines).block(block).render(filters_area, buf);

        let title = format!("All Products · sort: {}", state.sort.label());
        ProductList::new(self.state.products.product_list(), &title)
            .focused(state.focus == ListingFocus::Products)
            .render(products_area, buf, &mut state.products);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Product;
    use crate::presentation::ui::test_support::{StateBuilder, key};

    #[test]
    fn test_toggle_filter_refetches() {
        let state = StateBuilder::new().build();
        let mut listing = ListingScreenState::new(FilterParams::new());

        listing.handle_key(key(KeyCode::Tab), &state);
        listing.handle_key(key(KeyCode::Down), &state);
        let command = listing.handle_key(key(KeyCode::Char(' ')), &state);

        assert_eq!(
            command,
            ViewCommand::FetchListing {
                filters: FilterParams::single(FilterSection::Category, "personalCare"),
                sort: SortOption::PriceLowToHigh,
            }
        );
    }

    #[test]
    fn test_cursor_crosses_into_brands() {
        let state = StateBuilder::new().build();
        let mut listing = ListingScreenState::new(FilterParams::new());
        listing.handle_key(key(KeyCode::Tab), &state);
        for _ in 0..3 {
            listing.handle_key(key(KeyCode::Down), &state);
        }

        listing.handle_key(key(KeyCode::Enter), &state);

        assert!(listing.filters().is_selected(FilterSection::Brand, "clean"));
    }

    #[test]
    fn test_sort_cycles_and_refetches() {
        let state = StateBuilder::new().build();
        let filters = FilterParams::single(FilterSection::Brand, "fix");
        let mut listing = ListingScreenState::new(filters.clone());

        let command = listing.handle_key(key(KeyCode::Char('s')), &state);

        assert_eq!(
            command,
            ViewCommand::FetchListing {
                filters,
                sort: SortOption::PriceHighToLow
            }
        );
    }

    #[test]
    fn test_clear_filters() {
        let state = StateBuilder::new().build();
        let mut listing = ListingScreenState::new(FilterParams::single(FilterSection::Brand, "fix"));

        assert!(matches!(
            listing.handle_key(key(KeyCode::Char('c')), &state),
            ViewCommand::FetchListing { .. }
        ));
        assert!(listing.filters().is_empty());
        assert_eq!(listing.handle_key(key(KeyCode::Char('c')), &state), ViewCommand::Consumed);
    }

    #[test]
    fn test_product_actions() {
        let products = vec![Product::new("p1", "Drill"), Product::new("p2", "Saw")];
        let state = StateBuilder::new().products(products.clone()).build();
        let mut listing = ListingScreenState::new(FilterParams::new());

        listing.handle_key(key(KeyCode::Down), &state);

        assert_eq!(listing.handle_key(key(KeyCode::Enter), &state), ViewCommand::OpenDetails("p2".into()));
        assert_eq!(
            listing.handle_key(key(KeyCode::Char('a')), &state),
            ViewCommand::AddToCart(products[1].clone())
        );
    }
}
