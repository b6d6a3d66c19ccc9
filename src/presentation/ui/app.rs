//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind,
};
use futures_util::StreamExt;
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout},
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::application::store::{
    AddressAction, AuthAction, CartAction, OrderAction, Phase, ReviewAction, StoreAction,
};
use crate::application::{Dispatcher, Store};
use crate::domain::entities::{Cart, CartLineRequest, NewOrder, Product, ReviewForm, User};
use crate::domain::filter::FilterParams;
use crate::domain::ports::ShopApiPort;
use crate::infrastructure::AppConfig;
use crate::presentation::events::{EventHandler, EventResult, UiEvent};
use crate::presentation::ui::{
    AccountScreen, AccountScreenState, CarouselTimer, CartScreen, CartScreenState, DetailsOverlay,
    DetailsOverlayState, HomeScreen, HomeScreenState, ListingScreen, ListingScreenState,
    LoginAction, LoginScreen, SearchScreen, SearchScreenState, Tab, ViewCommand,
};
use crate::presentation::widgets::{HeaderBar, StatusBar};

const APP_TITLE: &str = "Handy Helpers";
const GLOBAL_HINTS: &str = "F1-F5 tabs · Ctrl+L logout · Ctrl+C quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Login,
    Shop,
    Exiting,
}

enum View {
    Home(HomeScreenState),
    Listing(ListingScreenState),
    Search(SearchScreenState),
    Cart(CartScreenState),
    Account(AccountScreenState),
}

impl View {
    const fn tab(&self) -> Tab {
        match self {
            Self::Home(_) => Tab::Home,
            Self::Listing(_) => Tab::Listing,
            Self::Search(_) => Tab::Search,
            Self::Cart(_) => Tab::Cart,
            Self::Account(_) => Tab::Account,
        }
    }

    fn handle_key(&mut self, key: KeyEvent, state: &crate::application::AppState) -> ViewCommand {
        match self {
            Self::Home(s) => s.handle_key(key, state),
            Self::Listing(s) => s.handle_key(key, state),
            Self::Search(s) => s.handle_key(key, state),
            Self::Cart(s) => s.handle_key(key, state),
            Self::Account(s) => s.handle_key(key, state),
        }
    }

    const fn hints(&self) -> &'static str {
        match self {
            Self::Home(_) => "Tab focus · ←/→ move · Enter open · [ ] banner · a add",
            Self::Listing(_) => "Tab filters/products · Space toggle · s sort · c clear · a add",
            Self::Search(_) => "type to search · ↓ results · Enter open · a add",
            Self::Cart(_) => "Tab items/addresses · +/- qty · d remove · c checkout",
            Self::Account(_) => "Tab orders/addresses · Enter details · n new · e edit · d delete",
        }
    }
}

/// The mounted view with the cancellation scope of its requests.
struct ActiveView {
    view: View,
    scope: CancellationToken,
    dispatcher: Dispatcher,
}

impl Drop for ActiveView {
    fn drop(&mut self) {
        self.scope.cancel();
    }
}

/// The storefront application: login, shop views and the event loop.
pub struct App {
    mode: Mode,
    login: LoginScreen,
    store: Store,
    dispatcher: Dispatcher,
    action_rx: mpsc::UnboundedReceiver<StoreAction>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    ui_rx: mpsc::UnboundedReceiver<UiEvent>,
    view: Option<ActiveView>,
    details: Option<DetailsOverlayState>,
    status: Option<StatusBar>,
    carousel_interval: Duration,
}

impl App {
    /// Builds the app on `api`; nothing is fetched until [`Self::run`].
    #[must_use]
    pub fn new(api: Arc<dyn ShopApiPort>, config: &AppConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();

        Self {
            mode: Mode::Login,
            login: LoginScreen::new(),
            store: Store::new(config.store.response_ordering()),
            dispatcher: Dispatcher::new(api, action_tx),
            action_rx,
            ui_tx,
            ui_rx,
            view: None,
            details: None,
            status: None,
            carousel_interval: config.ui.carousel_interval(),
        }
    }

    /// # Errors
    /// Returns error if drawing to or reading from the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.login.set_validating();
        self.dispatcher.check_auth();

        self.run_event_loop(terminal).await?;

        self.details = None;
        self.view = None;
        info!("Application exiting normally");
        Ok(())
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();

        terminal.draw(|frame| self.render(frame))?;

        while self.mode != Mode::Exiting {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_store_action(action);
                }

                Some(event) = self.ui_rx.recv() => {
                    self.handle_ui_event(event);
                }

                event = terminal_events.next() => match event {
                    Some(Ok(event)) => {
                        if self.handle_terminal_event(event) == EventResult::Exit {
                            self.mode = Mode::Exiting;
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => self.mode = Mode::Exiting,
                },
            }
            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => self.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::NONE)),
                MouseEventKind::ScrollDown => {
                    self.handle_key(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE))
                }
                _ => EventResult::Continue,
            },
            _ => EventResult::Continue,
        }
    }

    fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::CarouselTick => {
                if let Some(ActiveView {
                    view: View::Home(home),
                    ..
                }) = self.view.as_mut()
                {
                    home.on_tick(self.store.state().feature.feature_image_list().len());
                }
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        }

        match self.mode {
            Mode::Login => {
                if self.login.handle_key(key) == LoginAction::Submit
                    && let Some(credentials) = self.login.credentials()
                {
                    debug!(email = %credentials.email, "Submitting login");
                    self.login.set_validating();
                    self.dispatcher.login_user(credentials);
                }
                EventResult::Continue
            }
            Mode::Shop => {
                if EventHandler::is_logout_event(&key) {
                    self.logout();
                    return EventResult::Continue;
                }
                if let Some(tab) = EventHandler::tab_switch(&key) {
                    self.switch_tab(tab);
                    return EventResult::Continue;
                }

                let state = self.store.state();
                let command = if let Some(details) = self.details.as_mut()
                    && state.products.product_details().is_some()
                {
                    details.handle_key(key, state)
                } else if let Some(active) = self.view.as_mut() {
                    active.view.handle_key(key, state)
                } else {
                    ViewCommand::Consumed
                };
                self.handle_command(command);
                EventResult::Continue
            }
            Mode::Exiting => EventResult::Exit,
        }
    }

    fn user(&self) -> Option<&User> {
        self.store.state().auth.user()
    }

    fn view_dispatcher(&self) -> Dispatcher {
        self.view
            .as_ref()
            .map_or_else(|| self.dispatcher.clone(), |active| active.dispatcher.clone())
    }

    fn notify(&mut self, status: StatusBar) {
        self.status = Some(status);
    }

    fn handle_command(&mut self, command: ViewCommand) {
        let dispatcher = self.view_dispatcher();
        let user_id = self.user().map(|user| user.id().to_string());

        match command {
            ViewCommand::Consumed => {}
            ViewCommand::OpenListing(filters) => self.show(View::Listing(ListingScreenState::new(filters))),
            ViewCommand::FetchListing { filters, sort } => {
                dispatcher.fetch_all_filtered_products(filters, sort);
            }
            ViewCommand::Search(keyword) => {
                dispatcher.get_search_results(keyword);
            }
            ViewCommand::ResetSearch => dispatcher.reset_search_results(),
            ViewCommand::OpenDetails(product_id) => {
                dispatcher.fetch_product_details(product_id);
            }
            ViewCommand::CloseDetails => self.close_details(),
            ViewCommand::ShowOrder(order_id) => {
                dispatcher.get_order_details(order_id);
            }
            ViewCommand::CloseOrder => dispatcher.reset_order_details(),
            ViewCommand::Notice(message) => self.notify(StatusBar::warning(message)),
            command => match user_id {
                Some(user_id) => self.handle_user_command(&dispatcher, &user_id, command),
                None => {
                    warn!(?command, "Command needs a signed in user");
                    self.notify(StatusBar::warning("Please log in first"));
                }
            },
        }
    }

    fn handle_user_command(&mut self, dispatcher: &Dispatcher, user_id: &str, command: ViewCommand) {
        match command {
            ViewCommand::AddToCart(product) => self.add_to_cart(dispatcher, user_id, &product),
            ViewCommand::UpdateQuantity { product_id, quantity } => {
                dispatcher.update_cart_quantity(CartLineRequest::new(user_id, product_id, quantity));
            }
            ViewCommand::RemoveFromCart(product_id) => {
                dispatcher.delete_cart_item(user_id, product_id);
            }
            ViewCommand::SubmitReview { rating, message } => {
                let (Some(user), Some(details)) = (self.user(), self.details.as_ref()) else {
                    return;
                };
                let form = ReviewForm {
                    product_id: details.product_id().to_string(),
                    user_id: user.id().to_string(),
                    user_name: user.user_name().to_string(),
                    review_message: message,
                    review_value: rating,
                };
                dispatcher.add_review(form);
            }
            ViewCommand::Checkout(address) => {
                let Some(cart) = self.store.state().cart.cart().filter(|cart| !cart.is_empty()) else {
                    self.notify(StatusBar::warning("Your cart is empty"));
                    return;
                };
                let order = NewOrder::from_cart(user_id, cart, &address, Utc::now());
                info!(items = order.cart_items.len(), total = order.total_amount, "Creating order");
                dispatcher.create_new_order(order);
                self.notify(StatusBar::info("Creating order..."));
            }
            ViewCommand::SaveAddress { address_id, mut form } => {
                form.user_id = user_id.to_string();
                match address_id {
                    Some(address_id) => {
                        dispatcher.edit_address(user_id, address_id, form);
                    }
                    None => {
                        dispatcher.add_new_address(form);
                    }
                }
            }
            ViewCommand::DeleteAddress(address_id) => {
                dispatcher.delete_address(user_id, address_id);
            }
            other => debug!(command = ?other, "Unhandled command"),
        }
    }

    fn add_to_cart(&mut self, dispatcher: &Dispatcher, user_id: &str, product: &Product) {
        let verdict = match self.store.state().cart.cart() {
            Some(cart) => cart.check_can_add(product),
            None => Cart::default().check_can_add(product),
        };
        match verdict {
            Ok(()) => {
                dispatcher.add_to_cart(CartLineRequest::new(user_id, &product.id, 1));
            }
            Err(limit) => self.notify(StatusBar::warning(format!(
                "Only {limit} quantity can be added for this item"
            ))),
        }
    }

    fn switch_tab(&mut self, tab: Tab) {
        let view = match tab {
            Tab::Home => View::Home(HomeScreenState::new()),
            Tab::Listing => View::Listing(ListingScreenState::new(FilterParams::new())),
            Tab::Search => View::Search(SearchScreenState::new()),
            Tab::Cart => View::Cart(CartScreenState::new()),
            Tab::Account => View::Account(AccountScreenState::new()),
        };
        self.show(view);
    }

    /// Tears down the current view, cancelling its requests, and mounts `view`.
    fn show(&mut self, mut view: View) {
        self.close_details();
        if self.store.state().order.order_details().is_some() {
            self.dispatcher.reset_order_details();
        }
        if let Some(old) = self.view.take() {
            debug!(from = old.view.tab().title(), to = view.tab().title(), "Switching view");
        }

        let scope = CancellationToken::new();
        let dispatcher = self.dispatcher.scoped(scope.clone());
        let user_id = self.user().map(|user| user.id().to_string()).unwrap_or_default();

        match &mut view {
            View::Home(home) => {
                home.mount(&dispatcher);
                home.set_timer(CarouselTimer::start(self.carousel_interval, self.ui_tx.clone(), &scope));
            }
            View::Listing(listing) => listing.mount(&dispatcher),
            View::Search(search) => search.mount(&dispatcher),
            View::Cart(cart) => cart.mount(&dispatcher, &user_id),
            View::Account(account) => account.mount(&dispatcher, &user_id),
        }

        self.status = None;
        self.view = Some(ActiveView {
            view,
            scope,
            dispatcher,
        });
    }

    fn close_details(&mut self) {
        if self.details.take().is_some() || self.store.state().products.product_details().is_some() {
            self.dispatcher.set_product_details();
        }
    }

    /// Opens or drops the details overlay to match the products slice.
    fn sync_details(&mut self) {
        let current = self.store.state().products.product_details().map(|p| p.id.clone());
        let open = self.details.as_ref().map(|d| d.product_id().to_string());
        match (current, open) {
            (Some(id), Some(open)) if open == id => {}
            (Some(id), _) => {
                let details = DetailsOverlayState::new(id);
                details.mount(&self.view_dispatcher());
                self.details = Some(details);
            }
            (None, Some(_)) => self.details = None,
            (None, None) => {}
        }
    }

    fn enter_shop(&mut self, user_id: &str) {
        if self.mode == Mode::Shop {
            return;
        }
        self.mode = Mode::Shop;
        self.login.reset();
        self.dispatcher.fetch_cart_items(user_id);
        self.switch_tab(Tab::Home);
    }

    fn logout(&mut self) {
        info!("Logging out");
        self.close_details();
        self.view = None;
        self.status = None;
        self.mode = Mode::Login;
        self.login = LoginScreen::new();
        self.dispatcher.logout_user();
    }

    fn handle_store_action(&mut self, action: StoreAction) {
        let observed = action.clone();
        self.store.dispatch(action);
        self.follow_up(&observed);
        self.sync_details();
    }

    /// Dispatches that depend on how an action settled.
    fn follow_up(&mut self, action: &StoreAction) {
        match action {
            StoreAction::Auth(AuthAction::LoginUser(fetch)) => match &fetch.phase {
                Phase::Fulfilled(user) => {
                    info!(user = %user.user_name(), "Login successful");
                    self.enter_shop(user.id());
                    self.notify(StatusBar::success(format!("Welcome, {}", user.user_name())));
                }
                Phase::Rejected(e) => {
                    error!(error = %e, "Login failed");
                    self.login.set_error(e.user_message());
                }
                Phase::Cancelled => self.login.reset(),
                Phase::Pending => {}
            },
            StoreAction::Auth(AuthAction::CheckAuth(fetch)) => match &fetch.phase {
                Phase::Fulfilled(user) => {
                    info!(user = %user.user_name(), "Session restored");
                    self.enter_shop(user.id());
                }
                Phase::Rejected(e) => {
                    debug!(error = %e, "No active session");
                    if self.mode == Mode::Login {
                        self.login.reset();
                    }
                }
                _ => {}
            },
            StoreAction::Auth(AuthAction::LogoutUser(fetch)) => {
                if let Phase::Rejected(e) = &fetch.phase {
                    warn!(error = %e, "Logout request failed");
                }
            }
            StoreAction::Cart(CartAction::AddToCart(fetch)) => {
                self.after_cart_mutation(&fetch.phase, "Product is added to cart");
            }
            StoreAction::Cart(CartAction::UpdateCartQuantity(fetch)) => {
                self.after_cart_mutation(&fetch.phase, "Cart item is updated successfully");
            }
            StoreAction::Cart(CartAction::DeleteCartItem(fetch)) => {
                self.after_cart_mutation(&fetch.phase, "Cart item is deleted successfully");
            }
            StoreAction::Review(ReviewAction::AddReview(fetch)) => match &fetch.phase {
                Phase::Fulfilled(review) => {
                    let product_id = self
                        .details
                        .as_ref()
                        .map_or_else(|| review.product_id.clone(), |d| d.product_id().to_string());
                    self.view_dispatcher().get_reviews(product_id);
                    if let Some(details) = self.details.as_mut() {
                        details.reset_review();
                    }
                    self.notify(StatusBar::success("Review added successfully!"));
                }
                Phase::Rejected(e) => self.notify(StatusBar::error(e.user_message())),
                _ => {}
            },
            StoreAction::Address(AddressAction::AddNewAddress(fetch) | AddressAction::EditAddress(fetch)) => {
                match &fetch.phase {
                    Phase::Fulfilled(_) => {
                        if let Some(ActiveView {
                            view: View::Account(account),
                            ..
                        }) = self.view.as_mut()
                        {
                            account.reset_form();
                        }
                        self.refresh_addresses();
                        self.notify(StatusBar::success("Address saved"));
                    }
                    Phase::Rejected(e) => self.notify(StatusBar::error(e.user_message())),
                    _ => {}
                }
            }
            StoreAction::Address(AddressAction::DeleteAddress(fetch)) => match &fetch.phase {
                Phase::Fulfilled(()) => {
                    self.refresh_addresses();
                    self.notify(StatusBar::success("Address deleted"));
                }
                Phase::Rejected(e) => self.notify(StatusBar::error(e.user_message())),
                _ => {}
            },
            StoreAction::Order(OrderAction::CreateNewOrder(fetch)) => match &fetch.phase {
                Phase::Fulfilled(created) => self.open_approval(&created.approval_url),
                Phase::Rejected(e) => self.notify(StatusBar::error(e.user_message())),
                _ => {}
            },
            _ => {}
        }
    }

    fn after_cart_mutation<T>(&mut self, phase: &Phase<T>, success: &str) {
        match phase {
            Phase::Fulfilled(_) => {
                if let Some(user_id) = self.user().map(|user| user.id().to_string()) {
                    self.view_dispatcher().fetch_cart_items(user_id);
                }
                self.notify(StatusBar::success(success));
            }
            Phase::Rejected(e) => self.notify(StatusBar::error(e.user_message())),
            _ => {}
        }
    }

    fn refresh_addresses(&self) {
        if let Some(user) = self.user() {
            self.view_dispatcher().fetch_all_addresses(user.id());
        }
    }

    fn open_approval(&mut self, url: &str) {
        info!(url = %url, "Opening payment approval page");
        match opener::open(url) {
            Ok(()) => self.notify(StatusBar::info("Complete the payment in your browser")),
            Err(e) => {
                warn!(error = %e, "Failed to open browser");
                self.notify(StatusBar::warning(format!("Open this link to pay: {url}")));
            }
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        match self.mode {
            Mode::Login | Mode::Exiting => frame.render_widget(&self.login, frame.area()),
            Mode::Shop => self.render_shop(frame),
        }
    }

    fn render_shop(&mut self, frame: &mut Frame) {
        let [header_area, body_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let state = self.store.state();
        let tab = self.view.as_ref().map_or(Tab::Home, |active| active.view.tab());
        let initials = state.auth.user().map(User::initials).unwrap_or_default();
        frame.render_widget(
            HeaderBar::new(APP_TITLE)
                .active_tab(tab)
                .cart_count(state.cart.item_count())
                .initials(initials),
            header_area,
        );

        let mut hints = GLOBAL_HINTS.to_string();
        if let Some(active) = self.view.as_mut() {
            hints = format!("{} · {GLOBAL_HINTS}", active.view.hints());
            match &mut active.view {
                View::Home(s) => frame.render_stateful_widget(HomeScreen::new(state), body_area, s),
                View::Listing(s) => frame.render_stateful_widget(ListingScreen::new(state), body_area, s),
                View::Search(s) => frame.render_stateful_widget(SearchScreen::new(state), body_area, s),
                View::Cart(s) => frame.render_stateful_widget(CartScreen::new(state), body_area, s),
                View::Account(s) => frame.render_stateful_widget(AccountScreen::new(state), body_area, s),
            }
        }
        if let Some(details) = self.details.as_mut() {
            frame.render_stateful_widget(DetailsOverlay::new(state), body_area, details);
        }

        let status = self
            .status
            .clone()
            .unwrap_or_default()
            .hints(hints)
            .loading(state.any_loading());
        frame.render_widget(&status, status_area);
    }
}
