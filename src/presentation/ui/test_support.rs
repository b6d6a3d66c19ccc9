//! Store fixtures for screen tests.

use crate::application::store::{
    AddressAction, AppState, AuthAction, CartAction, FeatureAction, Fetch, OrderAction,
    ProductsAction, RequestId, ReviewAction, SearchAction, Store, StoreAction,
};
use crate::domain::entities::{Address, Cart, FeatureImage, Order, Product, Review, User};

/// Builds an [`AppState`] by replaying fulfilled fetches.
#[derive(Default)]
pub struct StateBuilder {
    store: Store,
    next: u64,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn id(&mut self) -> RequestId {
        self.next += 1;
        RequestId(self.next)
    }

    pub fn products(mut self, products: Vec<Product>) -> Self {
        let id = self.id();
        self.store.dispatch(StoreAction::Products(ProductsAction::FetchAllFilteredProducts(
            Fetch::fulfilled(id, products),
        )));
        self
    }

    pub fn details(mut self, product: Product) -> Self {
        let id = self.id();
        self.store.dispatch(StoreAction::Products(ProductsAction::FetchProductDetails(
            Fetch::fulfilled(id, product),
        )));
        self
    }

    pub fn search_results(mut self, products: Vec<Product>) -> Self {
        let id = self.id();
        self.store
            .dispatch(StoreAction::Search(SearchAction::GetSearchResults(Fetch::fulfilled(id, products))));
        self
    }

    pub fn features(mut self, images: Vec<FeatureImage>) -> Self {
        let id = self.id();
        self.store
            .dispatch(StoreAction::Feature(FeatureAction::GetFeatureImages(Fetch::fulfilled(id, images))));
        self
    }

    pub fn reviews(mut self, reviews: Vec<Review>) -> Self {
        let id = self.id();
        self.store
            .dispatch(StoreAction::Review(ReviewAction::GetReviews(Fetch::fulfilled(id, reviews))));
        self
    }

    pub fn cart(mut self, cart: Cart) -> Self {
        let id = self.id();
        self.store
            .dispatch(StoreAction::Cart(CartAction::FetchCartItems(Fetch::fulfilled(id, cart))));
        self
    }

    pub fn addresses(mut self, addresses: Vec<Address>) -> Self {
        let id = self.id();
        self.store.dispatch(StoreAction::Address(AddressAction::FetchAllAddresses(
            Fetch::fulfilled(id, addresses),
        )));
        self
    }

    pub fn orders(mut self, orders: Vec<Order>) -> Self {
        let id = self.id();
        self.store
            .dispatch(StoreAction::Order(OrderAction::GetAllOrdersByUser(Fetch::fulfilled(id, orders))));
        self
    }

    pub fn order_details(mut self, order: Order) -> Self {
        let id = self.id();
        self.store
            .dispatch(StoreAction::Order(OrderAction::GetOrderDetails(Fetch::fulfilled(id, order))));
        self
    }

    pub fn user(mut self, user: User) -> Self {
        let id = self.id();
        self.store
            .dispatch(StoreAction::Auth(AuthAction::LoginUser(Fetch::fulfilled(id, user))));
        self
    }

    pub fn build(self) -> AppState {
        self.store.state().clone()
    }
}

pub fn key(code: crossterm::event::KeyCode) -> crossterm::event::KeyEvent {
    crossterm::event::KeyEvent::new(code, crossterm::event::KeyModifiers::NONE)
}
