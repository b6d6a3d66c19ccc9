//! Application state store.
//!
//! State is split into slices. Each slice owns its data and a reducer that
//! consumes the slice and an action and returns the next slice; nothing else
//! mutates it. Views read [`AppState`] and dispatch through
//! [`crate::application::Dispatcher`], whose fetch phases arrive here as
//! [`StoreAction`]s.

pub mod fetch;
pub mod slices;

use tracing::trace;

pub use fetch::{Fetch, FetchStatus, Outcome, Phase, RequestId, ResponseOrdering};
pub use slices::{
    AddressAction, AddressSlice, AuthAction, AuthSlice, CartAction, CartSlice, FeatureAction,
    FeatureSlice, OrderAction, OrderSlice, ProductsAction, ProductsSlice, ReviewAction,
    ReviewSlice, SearchAction, SearchSlice,
};

/// A named partition of the application state.
pub trait Slice: Default {
    /// Actions this slice responds to.
    type Action;

    /// Applies `action`, returning the next state.
    #[must_use]
    fn reduce(self, action: Self::Action, ordering: ResponseOrdering) -> Self;

    /// Whether a request of this slice is outstanding.
    fn is_loading(&self) -> bool;
}

/// Every action the store understands, tagged by slice.
#[derive(Debug, Clone)]
pub enum StoreAction {
    /// Search results.
    Search(SearchAction),
    /// Product reviews.
    Review(ReviewAction),
    /// Product listing and details.
    Products(ProductsAction),
    /// Shopping cart.
    Cart(CartAction),
    /// Home page banners.
    Feature(FeatureAction),
    /// Saved addresses.
    Address(AddressAction),
    /// Orders and checkout.
    Order(OrderAction),
    /// Signed-in user.
    Auth(AuthAction),
}

impl StoreAction {
    /// Action type string, e.g. `search/getSearchResults/pending`.
    #[must_use]
    pub fn type_name(&self) -> String {
        match self {
            Self::Search(a) => a.type_name(),
            Self::Review(a) => a.type_name(),
            Self::Products(a) => a.type_name(),
            Self::Cart(a) => a.type_name(),
            Self::Feature(a) => a.type_name(),
            Self::Address(a) => a.type_name(),
            Self::Order(a) => a.type_name(),
            Self::Auth(a) => a.type_name(),
        }
    }
}

/// The whole storefront state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Keyword search results.
    pub search: SearchSlice,
    /// Reviews of the open product.
    pub review: ReviewSlice,
    /// Filtered listing and the open product.
    pub products: ProductsSlice,
    /// Cart of the signed-in user.
    pub cart: CartSlice,
    /// Home carousel images.
    pub feature: FeatureSlice,
    /// Saved delivery addresses.
    pub address: AddressSlice,
    /// Order history, open order and last checkout.
    pub order: OrderSlice,
    /// Session user.
    pub auth: AuthSlice,
}

impl AppState {
    /// Routes `action` to its slice.
    #[must_use]
    pub fn reduce(self, action: StoreAction, ordering: ResponseOrdering) -> Self {
        match action {
            StoreAction::Search(a) => Self {
                search: self.search.reduce(a, ordering),
                ..self
            },
            StoreAction::Review(a) => Self {
                review: self.review.reduce(a, ordering),
                ..self
            },
            StoreAction::Products(a) => Self {
                products: self.products.reduce(a, ordering),
                ..self
            },
            StoreAction::Cart(a) => Self {
                cart: self.cart.reduce(a, ordering),
                ..self
            },
            StoreAction::Feature(a) => Self {
                feature: self.feature.reduce(a, ordering),
                ..self
            },
            StoreAction::Address(a) => Self {
                address: self.address.reduce(a, ordering),
                ..self
            },
            StoreAction::Order(a) => Self {
                order: self.order.reduce(a, ordering),
                ..self
            },
            StoreAction::Auth(a) => Self {
                auth: self.auth.reduce(a, ordering),
                ..self
            },
        }
    }

    /// Whether any slice has a request outstanding.
    #[must_use]
    pub fn any_loading(&self) -> bool {
        self.search.is_loading()
            || self.review.is_loading()
            || self.products.is_loading()
            || self.cart.is_loading()
            || self.feature.is_loading()
            || self.address.is_loading()
            || self.order.is_loading()
            || self.auth.is_loading()
    }
}

/// Owner of the current [`AppState`].
#[derive(Debug, Default)]
pub struct Store {
    state: AppState,
    ordering: ResponseOrdering,
}

impl Store {
    /// Empty store applying `ordering` to every slice.
    #[must_use]
    pub fn new(ordering: ResponseOrdering) -> Self {
        Self {
            state: AppState::default(),
            ordering,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Response ordering in effect.
    #[must_use]
    pub const fn ordering(&self) -> ResponseOrdering {
        self.ordering
    }

    /// Applies `action` to the current state.
    pub fn dispatch(&mut self, action: StoreAction) {
        trace!(action = %action.type_name(), "Reducing action");
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action, self.ordering);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Product;
    use crate::domain::errors::ShopError;

    #[test]
    fn test_dispatch_routes_to_slice() {
        let mut store = Store::default();

        store.dispatch(StoreAction::Search(SearchAction::GetSearchResults(Fetch::pending(RequestId(1)))));
        assert!(store.state().search.is_loading());
        assert!(store.state().any_loading());
        assert!(!store.state().review.is_loading());

        store.dispatch(StoreAction::Search(SearchAction::GetSearchResults(Fetch::fulfilled(
            RequestId(1),
            vec![Product::new("1", "Drill")],
        ))));
        assert!(!store.state().any_loading());
        assert_eq!(store.state().search.search_results()[0].title, "Drill");
    }

    #[test]
    fn test_every_slice_settles_loading() {
        let mut store = Store::default();
        let id = RequestId(1);
        let failure = || ShopError::network("down");

        let pending = vec![
            StoreAction::Search(SearchAction::GetSearchResults(Fetch::pending(id))),
            StoreAction::Review(ReviewAction::GetReviews(Fetch::pending(id))),
            StoreAction::Products(ProductsAction::FetchAllFilteredProducts(Fetch::pending(id))),
            StoreAction::Cart(CartAction::FetchCartItems(Fetch::pending(id))),
            StoreAction::Feature(FeatureAction::GetFeatureImages(Fetch::pending(id))),
            StoreAction::Address(AddressAction::FetchAllAddresses(Fetch::pending(id))),
            StoreAction::Order(OrderAction::GetAllOrdersByUser(Fetch::pending(id))),
            StoreAction::Auth(AuthAction::CheckAuth(Fetch::pending(id))),
        ];
        let rejected = vec![
            StoreAction::Search(SearchAction::GetSearchResults(Fetch::rejected(id, failure()))),
            StoreAction::Review(ReviewAction::GetReviews(Fetch::rejected(id, failure()))),
            StoreAction::Products(ProductsAction::FetchAllFilteredProducts(Fetch::rejected(id, failure()))),
            StoreAction::Cart(CartAction::FetchCartItems(Fetch::rejected(id, failure()))),
            StoreAction::Feature(FeatureAction::GetFeatureImages(Fetch::rejected(id, failure()))),
            StoreAction::Address(AddressAction::FetchAllAddresses(Fetch::rejected(id, failure()))),
            StoreAction::Order(OrderAction::GetAllOrdersByUser(Fetch::rejected(id, failure()))),
            StoreAction::Auth(AuthAction::CheckAuth(Fetch::rejected(id, failure()))),
        ];

        for action in pending {
            store.dispatch(action);
        }
        let state = store.state();
        assert!(state.search.is_loading() && state.review.is_loading() && state.products.is_loading());
        assert!(state.cart.is_loading() && state.feature.is_loading() && state.address.is_loading());
        assert!(state.order.is_loading() && state.auth.is_loading());

        for action in rejected {
            store.dispatch(action);
        }
        assert!(!store.state().any_loading());
    }

    #[test]
    fn test_type_name() {
        let action = StoreAction::Search(SearchAction::GetSearchResults(Fetch::pending(RequestId(1))));
        assert_eq!(action.type_name(), "search/getSearchResults/pending");
    }
}
