//! Shop REST API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::dto::{unwrap_data, unwrap_order_created, unwrap_success, unwrap_user};
use crate::domain::entities::{
    Address, AddressForm, Cart, CartLineRequest, Credentials, FeatureImage, NewOrder, Order,
    OrderCreated, Product, Review, ReviewForm, User,
};
use crate::domain::errors::ShopError;
use crate::domain::filter::{FilterParams, SortOption};
use crate::domain::ports::ShopApiPort;

/// Production API used when no base URL is configured.
pub const DEFAULT_API_BASE: &str = "https://handyhelpers-server.onrender.com/api";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the shop backend.
///
/// The session cookie set by `POST /auth/login` is kept in the client's
/// cookie store and sent with every later request.
pub struct ShopClient {
    client: Client,
    base_url: String,
}

impl ShopClient {
    /// Creates client against `base_url` with a per-request timeout.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ShopError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| ShopError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn segments_url(&self, segments: &[&str]) -> Result<Url, ShopError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ShopError::unexpected(format!("invalid API base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| ShopError::unexpected("API base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends `request` and returns its JSON body.
    async fn send(&self, request: RequestBuilder) -> Result<Value, ShopError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Failed to reach shop API");
            if e.is_timeout() {
                ShopError::network("request timed out")
            } else if e.is_connect() {
                ShopError::network("failed to connect to shop API")
            } else {
                ShopError::network(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::handle_error_response(status, response).await);
        }

        response.json::<Value>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse shop response");
            ShopError::malformed(format!("failed to parse response: {e}"))
        })
    }

    async fn handle_error_response(status: StatusCode, response: reqwest::Response) -> ShopError {
        let payload = response.json::<Value>().await.ok();
        debug!(status = %status, payload = ?payload, "Shop API returned error status");
        ShopError::Http {
            status: status.as_u16(),
            payload,
        }
    }

    async fn data<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ShopError> {
        unwrap_data(self.send(request).await?)
    }

    fn filter_query(filters: &FilterParams, sort: SortOption) -> Vec<(&'static str, String)> {
        let mut query = filters.to_query_pairs();
        query.push(("sortBy", sort.as_str().to_string()));
        query
    }
}

#[async_trait]
impl ShopApiPort for ShopClient {
    async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, ShopError> {
        debug!(keyword, "Searching products");
        let url = self.segments_url(&["shop", "search", keyword])?;
        self.data(self.client.get(url)).await
    }

    async fn fetch_filtered_products(
        &self,
        filters: &FilterParams,
        sort: SortOption,
    ) -> Result<Vec<Product>, ShopError> {
        let query = Self::filter_query(filters, sort);
        debug!(query = ?query, "Fetching filtered products");
        self.data(self.client.get(self.url("/shop/products/get")).query(&query))
            .await
    }

    async fn fetch_product_details(&self, product_id: &str) -> Result<Product, ShopError> {
        let url = self.url(&format!("/shop/products/get/{product_id}"));
        self.data(self.client.get(url)).await
    }

    async fn fetch_reviews(&self, product_id: &str) -> Result<Vec<Review>, ShopError> {
        let url = self.url(&format!("/shop/review/{product_id}"));
        self.data(self.client.get(url)).await
    }

    async fn add_review(&self, form: &ReviewForm) -> Result<Review, ShopError> {
        debug!(product_id = %form.product_id, "Submitting review");
        self.data(self.client.post(self.url("/shop/review/add")).json(form))
            .await
    }

    async fn add_to_cart(&self, request: &CartLineRequest) -> Result<Cart, ShopError> {
        self.data(self.client.post(self.url("/shop/cart/add")).json(request))
            .await
    }

    async fn fetch_cart(&self, user_id: &str) -> Result<Cart, ShopError> {
        let url = self.url(&format!("/shop/cart/get/{user_id}"));
        self.data(self.client.get(url)).await
    }

    async fn delete_cart_item(&self, user_id: &str, product_id: &str) -> Result<Cart, ShopError> {
        let url = self.url(&format!("/shop/cart/{user_id}/{product_id}"));
        self.data(self.client.delete(url)).await
    }

    async fn update_cart_quantity(&self, request: &CartLineRequest) -> Result<Cart, ShopError> {
        self.data(
            self.client
                .put(self.url("/shop/cart/update-cart"))
                .json(request),
        )
        .await
    }

    async fn fetch_feature_images(&self) -> Result<Vec<FeatureImage>, ShopError> {
        self.data(self.client.get(self.url("/common/feature/get")))
            .await
    }

    async fn fetch_addresses(&self, user_id: &str) -> Result<Vec<Address>, ShopError> {
        let url = self.url(&format!("/shop/address/get/{user_id}"));
        self.data(self.client.get(url)).await
    }

    async fn add_address(&self, form: &AddressForm) -> Result<Address, ShopError> {
        self.data(self.client.post(self.url("/shop/address/add")).json(form))
            .await
    }

    async fn edit_address(
        &self,
        user_id: &str,
        address_id: &str,
        form: &AddressForm,
    ) -> Result<Address, ShopError> {
        let url = self.url(&format!("/shop/address/update/{user_id}/{address_id}"));
        self.data(self.client.put(url).json(form)).await
    }

    async fn delete_address(&self, user_id: &str, address_id: &str) -> Result<(), ShopError> {
        let url = self.url(&format!("/shop/address/delete/{user_id}/{address_id}"));
        unwrap_success(self.send(self.client.delete(url)).await?)
    }

    async fn create_order(&self, order: &NewOrder) -> Result<OrderCreated, ShopError> {
        debug!(items = order.cart_items.len(), total = order.total_amount, "Creating order");
        let body = self
            .send(self.client.post(self.url("/shop/order/create")).json(order))
            .await?;
        unwrap_order_created(body)
    }

    async fn fetch_orders(&self, user_id: &str) -> Result<Vec<Order>, ShopError> {
        let url = self.url(&format!("/shop/order/list/{user_id}"));
        self.data(self.client.get(url)).await
    }

    async fn fetch_order_details(&self, order_id: &str) -> Result<Order, ShopError> {
        let url = self.url(&format!("/shop/order/details/{order_id}"));
        self.data(self.client.get(url)).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<User, ShopError> {
        debug!("Signing in");
        let body = self
            .send(self.client.post(self.url("/auth/login")).json(credentials))
            .await?;
        let user = unwrap_user(body)?;
        debug!(user_id = %user.id(), "Signed in");
        Ok(user)
    }

    async fn logout(&self) -> Result<(), ShopError> {
        unwrap_success(self.send(self.client.post(self.url("/auth/logout"))).await?)
    }

    async fn check_auth(&self) -> Result<User, ShopError> {
        match self.send(self.client.get(self.url("/auth/check-auth"))).await {
            Ok(body) => unwrap_user(body),
            Err(ShopError::Http { status: 401, .. }) => Err(ShopError::NotAuthenticated),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::FilterSection;

    #[test]
    fn test_client_creation() {
        let client = ShopClient::new(DEFAULT_API_BASE, Duration::from_secs(5));
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ShopClient::new("http://localhost:5000/api/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.url("/shop/cart/get/u1"), "http://localhost:5000/api/shop/cart/get/u1");
    }

    #[test]
    fn test_filter_query_appends_sort() {
        let filters = FilterParams::single(FilterSection::Brand, "fix");
        let query = ShopClient::filter_query(&filters, SortOption::TitleZToA);
        assert_eq!(
            query,
            vec![("brand", "fix".to_string()), ("sortBy", "title-ztoa".to_string())]
        );
    }

    #[test]
    fn test_search_keyword_is_one_encoded_segment() {
        let client = ShopClient::new("http://localhost:5000/api/", Duration::from_secs(5)).unwrap();

        let url = client.segments_url(&["shop", "search", "drill"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/shop/search/drill");

        let url = client.segments_url(&["shop", "search", "power drill/2"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/shop/search/power%20drill%2F2");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let client = ShopClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let error = client.fetch_feature_images().await.unwrap_err();
        assert!(error.is_network_error());
    }
}
