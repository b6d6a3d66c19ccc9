//! Fetch actions.
//!
//! Each action emits its `Pending` phase synchronously, issues exactly one
//! request on a spawned task, and emits `Fulfilled` or `Rejected` when the
//! request settles. Phases travel over an unbounded channel so the UI loop
//! applies them in the order they were produced.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::application::store::{
    AddressAction, AuthAction, CartAction, FeatureAction, Fetch, OrderAction, ProductsAction,
    RequestId, ReviewAction, SearchAction, StoreAction,
};
use crate::domain::entities::{
    Address, AddressForm, Cart, CartLineRequest, Credentials, FeatureImage, NewOrder, Order,
    OrderCreated, Product, Review, ReviewForm, User,
};
use crate::domain::errors::ShopError;
use crate::domain::filter::{FilterParams, SortOption};
use crate::domain::ports::ShopApiPort;

/// Resolves to the outcome of one fetch action.
///
/// Dropping the handle does not abort the request.
#[derive(Debug)]
pub struct FetchHandle<T> {
    request_id: RequestId,
    handle: JoinHandle<Result<T, ShopError>>,
}

impl<T> FetchHandle<T> {
    /// Id the store sees on every phase of this fetch.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Waits for the request to settle.
    ///
    /// # Errors
    /// Returns the rejection, or [`ShopError::Cancelled`] when the issuing
    /// scope was cancelled first.
    pub async fn settled(self) -> Result<T, ShopError> {
        self.handle
            .await
            .unwrap_or_else(|e| Err(ShopError::unexpected(format!("fetch task failed: {e}"))))
    }
}

/// Issues fetch actions against the shop API and reports their phases.
#[derive(Clone)]
pub struct Dispatcher {
    api: Arc<dyn ShopApiPort>,
    tx: mpsc::UnboundedSender<StoreAction>,
    next_id: Arc<AtomicU64>,
    scope: Option<CancellationToken>,
}

impl Dispatcher {
    /// Unscoped dispatcher; its fetches are never cancelled.
    #[must_use]
    pub fn new(api: Arc<dyn ShopApiPort>, tx: mpsc::UnboundedSender<StoreAction>) -> Self {
        Self {
            api,
            tx,
            next_id: Arc::new(AtomicU64::new(1)),
            scope: None,
        }
    }

    /// A dispatcher whose in-flight requests are abandoned once `token` is
    /// cancelled. Abandoned requests settle as `Cancelled`, which clears the
    /// loading flag and leaves slice data untouched.
    #[must_use]
    pub fn scoped(&self, token: CancellationToken) -> Self {
        Self {
            scope: Some(token),
            ..self.clone()
        }
    }

    fn send(&self, action: StoreAction) {
        if self.tx.send(action).is_err() {
            debug!("Store receiver dropped, discarding action");
        }
    }

    fn run<T, F, Fut>(&self, wrap: fn(Fetch<T>) -> StoreAction, call: F) -> FetchHandle<T>
    where
        T: Clone + Send + 'static,
        F: FnOnce(Arc<dyn ShopApiPort>) -> Fut,
        Fut: Future<Output = Result<T, ShopError>> + Send + 'static,
    {
        let request_id = RequestId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let pending = wrap(Fetch::pending(request_id));
        debug!(request = %request_id, action = %pending.type_name(), "Dispatching fetch");
        self.send(pending);

        let request = call(Arc::clone(&self.api));
        let tx = self.tx.clone();
        let scope = self.scope.clone();

        let handle = tokio::spawn(async move {
            let result = match scope {
                Some(token) => tokio::select! {
                    biased;
                    () = token.cancelled() => Err(ShopError::Cancelled),
                    result = request => result,
                },
                None => request.await,
            };

            let settled = match &result {
                Ok(payload) => Fetch::fulfilled(request_id, payload.clone()),
                Err(ShopError::Cancelled) => {
                    debug!(request = %request_id, "Fetch cancelled with its view");
                    Fetch::cancelled(request_id)
                }
                Err(e) => {
                    warn!(request = %request_id, error = %e, "Fetch rejected");
                    Fetch::rejected(request_id, e.clone())
                }
            };
            if tx.send(wrap(settled)).is_err() {
                debug!(request = %request_id, "Store receiver dropped before settle");
            }

            result
        });

        FetchHandle { request_id, handle }
    }

    /// `getSearchResults`
    pub fn get_search_results(&self, keyword: impl Into<String>) -> FetchHandle<Vec<Product>> {
        let keyword = keyword.into();
        self.run(
            |f| StoreAction::Search(SearchAction::GetSearchResults(f)),
            move |api| async move { api.search_products(&keyword).await },
        )
    }

    /// `resetSearchResults`
    pub fn reset_search_results(&self) {
        self.send(StoreAction::Search(SearchAction::ResetSearchResults));
    }

    /// `getReviews`
    pub fn get_reviews(&self, product_id: impl Into<String>) -> FetchHandle<Vec<Review>> {
        let product_id = product_id.into();
        self.run(
            |f| StoreAction::Review(ReviewAction::GetReviews(f)),
            move |api| async move { api.fetch_reviews(&product_id).await },
        )
    }

    /// `addReview`. The rejection carries the server's payload, see
    /// [`ShopError::rejection_payload`].
    pub fn add_review(&self, form: ReviewForm) -> FetchHandle<Review> {
        self.run(
            |f| StoreAction::Review(ReviewAction::AddReview(f)),
            move |api| async move { api.add_review(&form).await },
        )
    }

    /// `fetchAllFilteredProducts`
    pub fn fetch_all_filtered_products(
        &self,
        filters: FilterParams,
        sort: SortOption,
    ) -> FetchHandle<Vec<Product>> {
        self.run(
            |f| StoreAction::Products(ProductsAction::FetchAllFilteredProducts(f)),
            move |api| async move { api.fetch_filtered_products(&filters, sort).await },
        )
    }

    /// `fetchProductDetails`
    pub fn fetch_product_details(&self, product_id: impl Into<String>) -> FetchHandle<Product> {
        let product_id = product_id.into();
        self.run(
            |f| StoreAction::Products(ProductsAction::FetchProductDetails(f)),
            move |api| async move { api.fetch_product_details(&product_id).await },
        )
    }

    /// `setProductDetails`, closing the details view.
    pub fn set_product_details(&self) {
        self.send(StoreAction::Products(ProductsAction::SetProductDetails));
    }

    /// `addToCart`
    pub fn add_to_cart(&self, request: CartLineRequest) -> FetchHandle<Cart> {
        self.run(
            |f| StoreAction::Cart(CartAction::AddToCart(f)),
            move |api| async move { api.add_to_cart(&request).await },
        )
    }

    /// `fetchCartItems`
    pub fn fetch_cart_items(&self, user_id: impl Into<String>) -> FetchHandle<Cart> {
        let user_id = user_id.into();
        self.run(
            |f| StoreAction::Cart(CartAction::FetchCartItems(f)),
            move |api| async move { api.fetch_cart(&user_id).await },
        )
    }

    /// `deleteCartItem`
    pub fn delete_cart_item(
        &self,
        user_id: impl Into<String>,
        product_id: impl Into<String>,
    ) -> FetchHandle<Cart> {
        let user_id = user_id.into();
        let product_id = product_id.into();
        self.run(
            |f| StoreAction::Cart(CartAction::DeleteCartItem(f)),
            move |api| async move { api.delete_cart_item(&user_id, &product_id).await },
        )
    }

    /// `updateCartQuantity`
    pub fn update_cart_quantity(&self, request: CartLineRequest) -> FetchHandle<Cart> {
        self.run(
            |f| StoreAction::Cart(CartAction::UpdateCartQuantity(f)),
            move |api| async move { api.update_cart_quantity(&request).await },
        )
    }

    /// `getFeatureImages`
    pub fn get_feature_images(&self) -> FetchHandle<Vec<FeatureImage>> {
        self.run(
            |f| StoreAction::Feature(FeatureAction::GetFeatureImages(f)),
            move |api| async move { api.fetch_feature_images().await },
        )
    }

    /// `fetchAllAddresses`
    pub fn fetch_all_addresses(&self, user_id: impl Into<String>) -> FetchHandle<Vec<Address>> {
        let user_id = user_id.into();
        self.run(
            |f| StoreAction::Address(AddressAction::FetchAllAddresses(f)),
            move |api| async move { api.fetch_addresses(&user_id).await },
        )
    }

    /// `addNewAddress`
    pub fn add_new_address(&self, form: AddressForm) -> FetchHandle<Address> {
        self.run(
            |f| StoreAction::Address(AddressAction::AddNewAddress(f)),
            move |api| async move { api.add_address(&form).await },
        )
    }

    /// `editAddress`
    pub fn edit_address(
        &self,
        user_id: impl Into<String>,
        address_id: impl Into<String>,
        form: AddressForm,
    ) -> FetchHandle<Address> {
        let user_id = user_id.into();
        let address_id = address_id.into();
        self.run(
            |f| StoreAction::Address(AddressAction::EditAddress(f)),
            move |api| async move { api.edit_address(&user_id, &address_id, &form).await },
        )
    }

    /// `deleteAddress`
    pub fn delete_address(
        &self,
        user_id: impl Into<String>,
        address_id: impl Into<String>,
    ) -> FetchHandle<()> {
        let user_id = user_id.into();
        let address_id = address_id.into();
        self.run(
            |f| StoreAction::Address(AddressAction::DeleteAddress(f)),
            move |api| async move { api.delete_address(&user_id, &address_id).await },
        )
    }

    /// `createNewOrder`
    pub fn create_new_order(&self, order: NewOrder) -> FetchHandle<OrderCreated> {
        self.run(
            |f| StoreAction::Order(OrderAction::CreateNewOrder(f)),
            move |api| async move { api.create_order(&order).await },
        )
    }

    /// `getAllOrdersByUserId`
    pub fn get_all_orders_by_user(&self, user_id: impl Into<String>) -> FetchHandle<Vec<Order>> {
        let user_id = user_id.into();
        self.run(
            |f| StoreAction::Order(OrderAction::GetAllOrdersByUser(f)),
            move |api| async move { api.fetch_orders(&user_id).await },
        )
    }

    /// `getOrderDetails`
    pub fn get_order_details(&self, order_id: impl Into<String>) -> FetchHandle<Order> {
        let order_id = order_id.into();
        self.run(
            |f| StoreAction::Order(OrderAction::GetOrderDetails(f)),
            move |api| async move { api.fetch_order_details(&order_id).await },
        )
    }

    /// `resetOrderDetails`
    pub fn reset_order_details(&self) {
        self.send(StoreAction::Order(OrderAction::ResetOrderDetails));
    }

    /// `loginUser`
    pub fn login_user(&self, credentials: Credentials) -> FetchHandle<User> {
        self.run(
            |f| StoreAction::Auth(AuthAction::LoginUser(f)),
            move |api| async move { api.login(&credentials).await },
        )
    }

    /// `logoutUser`
    pub fn logout_user(&self) -> FetchHandle<()> {
        self.run(
            |f| StoreAction::Auth(AuthAction::LogoutUser(f)),
            move |api| async move { api.logout().await },
        )
    }

    /// `checkAuth`
    pub fn check_auth(&self) -> FetchHandle<User> {
        self.run(
            |f| StoreAction::Auth(AuthAction::CheckAuth(f)),
            move |api| async move { api.check_auth().await },
        )
    }
}
