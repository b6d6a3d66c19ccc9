//! Selectable product list.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use crate::domain::entities::Product;

/// Selection within a product list whose length may change between renders.
#[derive(Debug, Clone, Default)]
pub struct ProductListState {
    list: ListState,
}

impl ProductListState {
    /// Nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected index, clamped into `0..len`.
    #[must_use]
    pub fn selected(&self, len: usize) -> Option<usize> {
        if len == 0 {
            None
        } else {
            Some(self.list.selected().unwrap_or(0).min(len - 1))
        }
    }

    /// The selected product of `products`.
    #[must_use]
    pub fn selected_product<'p>(&self, products: &'p [Product]) -> Option<&'p Product> {
        self.selected(products.len()).map(|i| &products[i])
    }

    /// Selects the next row, stopping at the last.
    pub fn select_next(&mut self, len: usize) {
        if let Some(current) = self.selected(len) {
            self.list.select(Some((current + 1).min(len - 1)));
        }
    }

    /// Selects the previous row, stopping at the first.
    pub fn select_previous(&mut self, len: usize) {
        if let Some(current) = self.selected(len) {
            self.list.select(Some(current.saturating_sub(1)));
        }
    }

    /// Clears the selection.
    pub fn reset(&mut self) {
        self.list.select(None);
    }
}

/// Formats a price with the sale price when there is one.
#[must_use]
pub fn price_spans(product: &Product) -> Vec<Span<'static>> {
    if product.is_on_sale() {
        vec![
            Span::styled(
                format!("${:.2}", product.price),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT),
            ),
            Span::raw(" "),
            Span::styled(format!("${:.2}", product.sale_price), Style::default().fg(Color::Green)),
        ]
    } else {
        vec![Span::raw(format!("${:.2}", product.price))]
    }
}

/// Scrollable list of products with prices.
pub struct ProductList<'a> {
    products: &'a [Product],
    title: &'a str,
    focused: bool,
    empty_text: &'a str,
}

impl<'a> ProductList<'a> {
    /// List of `products` under `title`.
    #[must_use]
    pub const fn new(products: &'a [Product], title: &'a str) -> Self {
        Self {
            products,
            title,
            focused: true,
            empty_text: "",
        }
    }

    /// Highlights the border when focused.
    #[must_use]
    pub const fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Text shown in place of an empty list.
    #[must_use]
    pub const fn empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = text;
        self
    }

    fn item(product: &Product) -> ListItem<'static> {
        let mut spans = vec![Span::styled(
            product.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        spans.push(Span::raw("  "));
        spans.extend(price_spans(product));
        if product.is_out_of_stock() {
            spans.push(Span::styled("  Out of stock", Style::default().fg(Color::Red)));
        } else if product.total_stock < 10 {
            spans.push(Span::styled(
                format!("  Only {} left", product.total_stock),
                Style::default().fg(Color::Yellow),
            ));
        }
        ListItem::new(Line::from(spans))
    }
}

impl StatefulWidget for ProductList<'_> {
    type State = ProductListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border = if self.focused { Color::Cyan } else { Color::Gray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" {} ({}) ", self.title, self.products.len()));

        if self.products.is_empty() {
            let inner = block.inner(area);
            block.render(area, buf);
            Paragraph::new(self.empty_text)
                .style(Style::default().fg(Color::DarkGray))
                .render(inner, buf);
            return;
        }

        let selected = state.selected(self.products.len());
        state.list.select(selected);

        let items: Vec<ListItem<'_>> = self.products.iter().map(Self::item).collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(Color::DarkGray))
            .highlight_symbol("▶ ");
        StatefulWidget::render(list, area, buf, &mut state.list);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn products(n: usize) -> Vec<Product> {
        (0..n).map(|i| Product::new(i.to_string(), format!("Item {i}"))).collect()
    }

    #[test]
    fn test_selection_clamps_to_shrunk_list() {
        let mut state = ProductListState::new();
        for _ in 0..5 {
            state.select_next(6);
        }
        assert_eq!(state.selected(6), Some(5));
        assert_eq!(state.selected(2), Some(1));
        assert_eq!(state.selected(0), None);
    }

    #[test]
    fn test_selected_product() {
        let list = products(3);
        let mut state = ProductListState::new();
        state.select_next(list.len());
        state.select_next(list.len());
        state.select_previous(list.len());

        assert_eq!(state.selected_product(&list).map(|p| p.id.as_str()), Some("1"));
    }

    #[test]
    fn test_renders_empty_text() {
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        let mut state = ProductListState::new();

        ProductList::new(&[], "Results")
            .empty_text("No results")
            .render(area, &mut buf, &mut state);

        let row: String = (1..29).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.starts_with("No results"));
    }
}
