//! Order history and saved addresses.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::command::ViewCommand;
use crate::application::{AppState, Dispatcher};
use crate::domain::entities::{Address, AddressForm, Order};
use crate::presentation::widgets::TextInput;

/// Saved addresses allowed per user.
pub const MAX_ADDRESSES: usize = 3;

/// Region of the account view receiving keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountFocus {
    /// Order history.
    Orders,
    /// Saved addresses.
    Addresses,
    /// Address form.
    Form,
}

struct AddressFormInputs {
    fields: [TextInput; 5],
    active: usize,
    editing: Option<String>,
}

impl AddressFormInputs {
    fn new() -> Self {
        Self {
            fields: [
                TextInput::new(" Address ").placeholder("Enter your address"),
                TextInput::new(" City ").placeholder("Enter your city"),
                TextInput::new(" Pincode ").placeholder("Enter your pincode").digits(),
                TextInput::new(" Phone ").placeholder("Enter your phone number").digits(),
                TextInput::new(" Notes ").placeholder("Enter any additional notes"),
            ],
            active: 0,
            editing: None,
        }
    }

    fn load(&mut self, address: &Address) {
        let values = [&address.address, &address.city, &address.pincode, &address.phone, &address.notes];
        for (field, value) in self.fields.iter_mut().zip(values) {
            field.set_value(value.clone());
        }
        self.editing = Some(address.id.clone());
    }

    fn focus(&mut self, active: Option<usize>) {
        if let Some(index) = active {
            self.active = index;
        }
        for (i, field) in self.fields.iter_mut().enumerate() {
            field.set_focused(active == Some(i));
        }
    }

    fn form(&self) -> AddressForm {
        let [address, city, pincode, phone, notes] = &self.fields;
        AddressForm {
            user_id: String::new(),
            address: address.value().trim().to_string(),
            city: city.value().trim().to_string(),
            pincode: pincode.value().trim().to_string(),
            phone: phone.value().trim().to_string(),
            notes: notes.value().trim().to_string(),
        }
    }

    fn clear(&mut self) {
        for field in &mut self.fields {
            field.clear();
        }
        self.active = 0;
        self.editing = None;
    }
}

/// Selection and form state of the account view.
pub struct AccountScreenState {
    focus: AccountFocus,
    order_index: usize,
    address_index: usize,
    form: AddressFormInputs,
}

impl AccountScreenState {
    /// Focus on the order list, form closed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            focus: AccountFocus::Orders,
            order_index: 0,
            address_index: 0,
            form: AddressFormInputs::new(),
        }
    }

    /// Loads orders and addresses.
    pub fn mount(&self, dispatcher: &Dispatcher, user_id: &str) {
        dispatcher.get_all_orders_by_user(user_id);
        dispatcher.fetch_all_addresses(user_id);
    }

    /// Focused region.
    #[must_use]
    pub const fn focus(&self) -> AccountFocus {
        self.focus
    }

    /// Clears the address form after a successful save.
    pub fn reset_form(&mut self) {
        self.form.clear();
        if self.focus == AccountFocus::Form {
            self.set_focus(AccountFocus::Addresses);
        }
    }

    fn set_focus(&mut self, focus: AccountFocus) {
        self.focus = focus;
        self.form.focus((focus == AccountFocus::Form).then_some(self.form.active));
    }

    fn open_form(&mut self, address: Option<&Address>, addresses: &[Address]) -> ViewCommand {
        match address {
            Some(address) => self.form.load(address),
            None if addresses.len() >= MAX_ADDRESSES => {
                return ViewCommand::Notice(format!("You can add max {MAX_ADDRESSES} addresses"));
            }
            None => self.form.clear(),
        }
        self.form.active = 0;
        self.set_focus(AccountFocus::Form);
        ViewCommand::Consumed
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> ViewCommand {
        let last = self.form.fields.len() - 1;
        match key.code {
            KeyCode::Esc => self.set_focus(AccountFocus::Addresses),
            KeyCode::Up | KeyCode::BackTab => self.form.focus(Some(self.form.active.saturating_sub(1))),
            KeyCode::Down | KeyCode::Tab => self.form.focus(Some((self.form.active + 1).min(last))),
            KeyCode::Enter if self.form.active < last => self.form.focus(Some(self.form.active + 1)),
            KeyCode::Enter => {
                let form = self.form.form();
                if !form.is_complete() {
                    return ViewCommand::Notice("Address, city, pincode and phone are required".into());
                }
                return ViewCommand::SaveAddress {
                    address_id: self.form.editing.clone(),
                    form,
                };
            }
            _ => {
                self.form.fields[self.form.active].handle_key(key);
            }
        }
        ViewCommand::Consumed
    }

    /// Handles a key; Tab cycles between orders and addresses.
    pub fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> ViewCommand {
        if self.focus == AccountFocus::Form {
            return self.handle_form_key(key);
        }

        let orders = state.order.order_list();
        let addresses = state.address.address_list();

        if state.order.order_details().is_some() {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => ViewCommand::CloseOrder,
                _ => ViewCommand::Consumed,
            };
        }

        match (self.focus, key.code) {
            (_, KeyCode::Tab) => {
                let next = match self.focus {
                    AccountFocus::Orders => AccountFocus::Addresses,
                    _ => AccountFocus::Orders,
                };
                self.set_focus(next);
            }
            (AccountFocus::Orders, KeyCode::Up) => self.order_index = self.order_index.saturating_sub(1),
            (AccountFocus::Orders, KeyCode::Down) => {
                self.order_index = (self.order_index + 1).min(orders.len().saturating_sub(1));
            }
            (AccountFocus::Orders, KeyCode::Enter) => {
                if let Some(order) = orders.get(self.order_index) {
                    return ViewCommand::ShowOrder(order.id.clone());
                }
            }
            (AccountFocus::Addresses, KeyCode::Up) => self.address_index = self.address_index.saturating_sub(1),
            (AccountFocus::Addresses, KeyCode::Down) => {
                self.address_index = (self.address_index + 1).min(addresses.len().saturating_sub(1));
            }
            (AccountFocus::Addresses, KeyCode::Char('n')) => return self.open_form(None, addresses),
            (AccountFocus::Addresses, KeyCode::Char('e')) => {
                if let Some(address) = addresses.get(self.address_index) {
                    return self.open_form(Some(address), addresses);
                }
            }
            (AccountFocus::Addresses, KeyCode::Char('d') | KeyCode::Delete) => {
                if let Some(address) = addresses.get(self.address_index) {
                    let command = ViewCommand::DeleteAddress(address.id.clone());
                    self.address_index = self.address_index.min(addresses.len().saturating_sub(2));
                    return command;
                }
            }
            _ => {}
        }
        ViewCommand::Consumed
    }
}

impl Default for AccountScreenState {
    fn default() -> Self {
        Self::new()
    }
}

/// Orders and addresses, with the open order as a popup.
pub struct AccountScreen<'a> {
    state: &'a AppState,
}

impl<'a> AccountScreen<'a> {
    /// Renders from `state`.
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

fn order_row(order: &Order) -> ListItem<'static> {
    let date = order
        .order_date
        .map_or_else(String::new, |date| date.format("%Y-%m-%d").to_string());
    ListItem::new(Line::from(vec![
        Span::styled(order.id.clone(), Style::default().fg(Color::DarkGray)),
        Span::raw(format!("  {date}  ")),
        Span::styled(order.order_status.clone(), Style::default().fg(status_color(&order.order_status))),
        Span::raw(format!("  ${:.2}", order.total_amount)),
    ]))
}

fn status_color(status: &str) -> Color {
    match status {
        "confirmed" | "delivered" => Color::Green,
        "rejected" => Color::Red,
        _ => Color::Yellow,
    }
}

fn order_details(order: &Order) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = vec![
        Line::from(vec![Span::styled("Order ID  ", bold), Span::raw(order.id.clone())]),
        Line::from(vec![Span::styled("Price     ", bold), Span::raw(format!("${:.2}", order.total_amount))]),
        Line::from(vec![Span::styled("Payment   ", bold), Span::raw(order.payment_method.clone())]),
        Line::from(vec![Span::styled("Paid      ", bold), Span::raw(order.payment_status.clone())]),
        Line::from(vec![
            Span::styled("Status    ", bold),
            Span::styled(order.order_status.clone(), Style::default().fg(status_color(&order.order_status))),
        ]),
        Line::raw(""),
        Line::styled("Items", bold),
    ];
    lines.extend(order.cart_items.iter().map(|item| {
        Line::raw(format!("  {}  x{}  ${:.2}", item.title, item.quantity, item.price))
    }));
    let info = &order.address_info;
    lines.extend([
        Line::raw(""),
        Line::styled("Shipping", bold),
        Line::raw(format!("  {}, {} {}", info.address, info.city, info.pincode)),
        Line::raw(format!("  {}  {}", info.phone, info.notes)),
    ]);
    lines
}

impl StatefulWidget for AccountScreen<'_> {
    type State = AccountScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [orders_area, side_area] =
            Layout::horizontal([Constraint::Fill(3), Constraint::Fill(2)]).areas(area);

        let border = |focused: bool| Style::default().fg(if focused { Color::Cyan } else { Color::Gray });

        let orders = self.state.order.order_list();
        let mut list_state =
            ListState::default().with_selected((!orders.is_empty()).then(|| state.order_index.min(orders.len() - 1)));
        StatefulWidget::render(
            List::new(orders.iter().map(order_row).collect::<Vec<_>>())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border(state.focus == AccountFocus::Orders))
                        .title(" Order History "),
                )
                .highlight_style(Style::default().bg(Color::DarkGray)),
            orders_area,
            buf,
            &mut list_state,
        );

        if state.focus == AccountFocus::Form {
            let title = if state.form.editing.is_some() { " Edit Address " } else { " Add New Address " };
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(border(true))
                .title(title)
                .title_bottom(" Enter next/save · Esc cancel ");
            let inner = block.inner(side_area);
            block.render(side_area, buf);
            let rows = Layout::vertical([Constraint::Length(3); 5]).split(inner);
            for (field, row) in state.form.fields.iter().zip(rows.iter()) {
                field.render(*row, buf);
            }
        } else {
            let addresses = self.state.address.address_list();
            let mut list_state = ListState::default()
                .with_selected((!addresses.is_empty()).then(|| state.address_index.min(addresses.len() - 1)));
            StatefulWidget::render(
                List::new(addresses.iter().map(|a| ListItem::new(a.summary())).collect::<Vec<_>>())
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .border_style(border(state.focus == AccountFocus::Addresses))
                            .title(" Addresses ")
                            .title_bottom(" n new · e edit · d delete "),
                    )
                    .highlight_style(Style::default().bg(Color::DarkGray)),
                side_area,
                buf,
                &mut list_state,
            );
        }

        if let Some(order) = self.state.order.order_details() {
            let popup = area.inner(ratatui::layout::Margin::new(area.width / 6, area.height / 8));
            Clear.render(popup, buf);
            Paragraph::new(order_details(order))
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow))
                        .title(" Order Details ")
                        .title_bottom(" Esc close "),
                )
                .render(popup, buf);
        }
    }
}
