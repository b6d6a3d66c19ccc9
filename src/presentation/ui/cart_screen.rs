//! Cart contents, delivery address and checkout.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::command::ViewCommand;
use crate::application::{AppState, Dispatcher};
use crate::domain::entities::CartItem;

/// Region of the cart view receiving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartFocus {
    /// Cart lines.
    Items,
    /// Delivery addresses.
    Addresses,
}

/// Selection state of the cart view.
pub struct CartScreenState {
    focus: CartFocus,
    item_index: usize,
    address_index: Option<usize>,
}

impl CartScreenState {
    /// Focus on the first cart line, no address selected.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            focus: CartFocus::Items,
            item_index: 0,
            address_index: None,
        }
    }

    /// Loads the cart and the addresses.
    pub fn mount(&self, dispatcher: &Dispatcher, user_id: &str) {
        dispatcher.fetch_cart_items(user_id);
        dispatcher.fetch_all_addresses(user_id);
    }

    /// Focused region.
    #[must_use]
    pub const fn focus(&self) -> CartFocus {
        self.focus
    }

    /// Index of the address chosen for delivery.
    #[must_use]
    pub const fn selected_address(&self) -> Option<usize> {
        self.address_index
    }

    fn items(state: &AppState) -> &[CartItem] {
        state.cart.cart().map_or(&[], |cart| cart.items.as_slice())
    }

    /// Stock of `product_id` as last seen in a product list; unknown stock never blocks.
    fn stock_of(state: &AppState, product_id: &str) -> Option<u32> {
        state
            .products
            .product_list()
            .iter()
            .chain(state.search.search_results())
            .chain(state.products.product_details())
            .find(|product| product.id == product_id)
            .map(|product| product.total_stock)
    }

    fn change_quantity(&self, state: &AppState, increase: bool) -> ViewCommand {
        let Some(item) = Self::items(state).get(self.item_index) else {
            return ViewCommand::Consumed;
        };
        let quantity = if increase {
            item.quantity.saturating_add(1)
        } else {
            item.quantity.saturating_sub(1)
        };
        if quantity < 1 {
            return ViewCommand::Consumed;
        }
        if increase
            && let Some(stock) = Self::stock_of(state, &item.product_id)
            && quantity > stock
        {
            return ViewCommand::Notice(format!("Only {stock} quantity can be added for this item"));
        }
        ViewCommand::UpdateQuantity {
            product_id: item.product_id.clone(),
            quantity,
        }
    }

    /// Handles a key; `c` checks out from either region.
    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> ViewCommand {
        let items = Self::items(state);
        let addresses = state.address.address_list();

        match (self.focus, key.code) {
            (_, KeyCode::Tab) => {
                self.focus = match self.focus {
                    CartFocus::Items => CartFocus::Addresses,
                    CartFocus::Addresses => CartFocus::Items,
                };
            }
            (_, KeyCode::Char('c')) => {
                if items.is_empty() {
                    return ViewCommand::Notice("Your cart is empty".into());
                }
                return match self.address_index.and_then(|i| addresses.get(i)) {
                    Some(address) => ViewCommand::Checkout(address.clone()),
                    None => ViewCommand::Notice("Please select one address to proceed.".into()),
                };
            }
            (CartFocus::Items, KeyCode::Up) => self.item_index = self.item_index.saturating_sub(1),
            (CartFocus::Items, KeyCode::Down) => {
                self.item_index = (self.item_index + 1).min(items.len().saturating_sub(1));
            }
            (CartFocus::Items, KeyCode::Char('+' | '=')) => return self.change_quantity(state, true),
            (CartFocus::Items, KeyCode::Char('-')) => return self.change_quantity(state, false),
            (CartFocus::Items, KeyCode::Char('d') | KeyCode::Delete) => {
                if let Some(item) = items.get(self.item_index) {
                    let command = ViewCommand::RemoveFromCart(item.product_id.clone());
                    self.item_index = self.item_index.min(items.len().saturating_sub(2));
                    return command;
                }
            }
            (CartFocus::Addresses, KeyCode::Up) => {
                self.address_index = Some(self.address_index.map_or(0, |i| i.saturating_sub(1)));
            }
            (CartFocus::Addresses, KeyCode::Down) if !addresses.is_empty() => {
                self.address_index = Some(self.address_index.map_or(0, |i| (i + 1).min(addresses.len() - 1)));
            }
            (CartFocus::Addresses, KeyCode::Enter | KeyCode::Char(' ')) if !addresses.is_empty() => {
                self.address_index = Some(self.address_index.unwrap_or(0).min(addresses.len() - 1));
            }
            _ => {}
        }
        ViewCommand::Consumed
    }
}

impl Default for CartScreenState {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart lines, delivery addresses and total.
pub struct CartScreen<'a> {
    state: &'a AppState,
}

impl<'a> CartScreen<'a> {
    /// Renders from `state`.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

fn focus_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::Gray }))
        .title(title)
}

impl StatefulWidget for CartScreen<'_> {
    type State = CartScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [items_area, side_area] =
            Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).areas(area);
        let [addresses_area, total_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(4)]).areas(side_area);

        let items = CartScreenState::items(self.state);
        let block = focus_block(" Cart ", state.focus == CartFocus::Items);
        if items.is_empty() {
            Paragraph::new(Line::styled("Your cart is empty", Style::default().fg(Color::DarkGray)))
                .block(block)
                .render(items_area, buf);
        } else {
            let rows: Vec<ListItem<'_>> = items
                .iter()
                .map(|item| {
                    ListItem::new(Line::from(vec![
                        Span::styled(item.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                        Span::raw(format!("  x{}  ", item.quantity)),
                        Span::styled(format!("${:.2}", item.line_total()), Style::default().fg(Color::Green)),
                    ]))
                })
                .collect();
            let mut list_state = ListState::default().with_selected(Some(state.item_index.min(items.len() - 1)));
            StatefulWidget::render(
                List::new(rows)
                    .block(block.title_bottom(" +/- quantity · d remove "))
                    .highlight_style(Style::default().bg(Color::DarkGray))
                    .highlight_symbol("> "),
                items_area,
                buf,
                &mut list_state,
            );
        }

        let addresses = self.state.address.address_list();
        let rows: Vec<ListItem<'_>> = addresses
            .iter()
            .enumerate()
            .map(|(i, address)| {
                let mark = if state.address_index == Some(i) { "(•) " } else { "( ) " };
                ListItem::new(format!("{mark}{}", address.summary()))
            })
            .collect();
        let mut list_state = ListState::default().with_selected(state.address_index);
        StatefulWidget::render(
            List::new(rows)
                .block(focus_block(" Deliver to ", state.focus == CartFocus::Addresses))
                .highlight_style(Style::default().fg(Color::Yellow)),
            addresses_area,
            buf,
            &mut list_state,
        );

        let total = self.state.cart.cart().map_or(0.0, crate::domain::entities::Cart::total);
        Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Total ", Style::default().add_modifier(Modifier::BOLD)),
                Span::styled(format!("${total:.2}"), Style::default().fg(Color::Green)),
            ]),
            Line::styled("c checkout with PayPal", Style::default().fg(Color::DarkGray)),
        ])
        .block(Block::default().borders(Borders::ALL))
        .render(total_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Address, Cart, Product};
    use crate::presentation::ui::test_support::{StateBuilder, key};

    fn cart(quantities: &[(&str, u32)]) -> Cart {
        Cart {
            id: Some("c1".into()),
            user_id: "u1".into(),
            items: quantities
                .iter()
                .map(|(id, quantity)| CartItem {
                    product_id: (*id).to_string(),
                    image: None,
                    title: format!("Item {id}"),
                    price: 10.0,
                    sale_price: 0.0,
                    quantity: *quantity,
                })
                .collect(),
        }
    }

    fn address(id: &str) -> Address {
        Address {
            id: id.into(),
            user_id: "u1".into(),
            address: "1 Main St".into(),
            city: "Springfield".into(),
            pincode: "12345".into(),
            phone: "5550100".into(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_quantity_changes() {
        let state = StateBuilder::new().cart(cart(&[("p1", 1), ("p2", 3)])).build();
        let mut screen = CartScreenState::new();

        assert_eq!(screen.handle_key(key(KeyCode::Char('-')), &state), ViewCommand::Consumed);

        screen.handle_key(key(KeyCode::Down), &state);
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('-')), &state),
            ViewCommand::UpdateQuantity {
                product_id: "p2".into(),
                quantity: 2
            }
        );
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('+')), &state),
            ViewCommand::UpdateQuantity {
                product_id: "p2".into(),
                quantity: 4
            }
        );
    }

    #[test]
    fn test_increase_respects_known_stock() {
        let state = StateBuilder::new()
            .products(vec![Product::new("p1", "Drill").with_stock(2)])
            .cart(cart(&[("p1", 2)]))
            .build();
        let mut screen = CartScreenState::new();

        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('+')), &state),
            ViewCommand::Notice(msg) if msg.contains("Only 2")
        ));
    }

    #[test]
    fn test_increase_at_quantity_limit() {
        let state = StateBuilder::new()
            .products(vec![Product::new("p1", "Drill").with_stock(3)])
            .cart(cart(&[("p1", u32::MAX)]))
            .build();
        let mut screen = CartScreenState::new();

        assert_eq!(
            screen.handle_key(key(KeyCode::Char('+')), &state),
            ViewCommand::Notice("Only 3 quantity can be added for this item".into())
        );
    }

    #[test]
    fn test_remove_item() {
        let state = StateBuilder::new().cart(cart(&[("p1", 1)])).build();
        let mut screen = CartScreenState::new();

        assert_eq!(screen.handle_key(key(KeyCode::Char('d')), &state), ViewCommand::RemoveFromCart("p1".into()));
    }

    #[test]
    fn test_checkout_requires_address() {
        let state = StateBuilder::new()
            .cart(cart(&[("p1", 1)]))
            .addresses(vec![address("a1"), address("a2")])
            .build();
        let mut screen = CartScreenState::new();

        assert!(matches!(screen.handle_key(key(KeyCode::Char('c')), &state), ViewCommand::Notice(_)));

        screen.handle_key(key(KeyCode::Tab), &state);
        screen.handle_key(key(KeyCode::Down), &state);
        screen.handle_key(key(KeyCode::Down), &state);
        assert_eq!(screen.selected_address(), Some(1));

        assert_eq!(screen.handle_key(key(KeyCode::Char('c')), &state), ViewCommand::Checkout(address("a2")));
    }

    #[test]
    fn test_empty_cart_cannot_checkout() {
        let state = StateBuilder::new().addresses(vec![address("a1")]).build();
        let mut screen = CartScreenState::new();
        screen.handle_key(key(KeyCode::Tab), &state);
        screen.handle_key(key(KeyCode::Enter), &state);

        assert_eq!(
            screen.handle_key(key(KeyCode::Char('c')), &state),
            ViewCommand::Notice("Your cart is empty".into())
        );
    }
}
