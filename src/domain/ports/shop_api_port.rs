//! Shop backend port definition.

use async_trait::async_trait;

use crate::domain::entities::{
    Address, AddressForm, Cart, CartLineRequest, Credentials, FeatureImage, NewOrder, Order,
    OrderCreated, Product, Review, ReviewForm, User,
};
use crate::domain::errors::ShopError;
use crate::domain::filter::{FilterParams, SortOption};

/// Port for the shop REST API.
///
/// Every method is a single request: no retry, no caching. A response whose
/// envelope reports `success: false` or lacks `data` is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShopApiPort: Send + Sync {
    /// `GET /shop/search/:keyword`
    async fn search_products(&self, keyword: &str) -> Result<Vec<Product>, ShopError>;

    /// `GET /shop/products/get` with filter and sort query.
    async fn fetch_filtered_products(
        &self,
        filters: &FilterParams,
        sort: SortOption,
    ) -> Result<Vec<Product>, ShopError>;

    /// `GET /shop/products/get/:id`
    async fn fetch_product_details(&self, product_id: &str) -> Result<Product, ShopError>;

    /// `GET /shop/review/:productId`
    async fn fetch_reviews(&self, product_id: &str) -> Result<Vec<Review>, ShopError>;

    /// `POST /shop/review/add`
    async fn add_review(&self, form: &ReviewForm) -> Result<Review, ShopError>;

    /// `POST /shop/cart/add`
    async fn add_to_cart(&self, request: &CartLineRequest) -> Result<Cart, ShopError>;

    /// `GET /shop/cart/get/:userId`
    async fn fetch_cart(&self, user_id: &str) -> Result<Cart, ShopError>;

    /// `DELETE /shop/cart/:userId/:productId`
    async fn delete_cart_item(&self, user_id: &str, product_id: &str) -> Result<Cart, ShopError>;

    /// `PUT /shop/cart/update-cart`
    async fn update_cart_quantity(&self, request: &CartLineRequest) -> Result<Cart, ShopError>;

    /// `GET /common/feature/get`
    async fn fetch_feature_images(&self) -> Result<Vec<FeatureImage>, ShopError>;

    /// `GET /shop/address/get/:userId`
    async fn fetch_addresses(&self, user_id: &str) -> Result<Vec<Address>, ShopError>;

    /// `POST /shop/address/add`
    async fn add_address(&self, form: &AddressForm) -> Result<Address, ShopError>;

    /// `PUT /shop/address/update/:userId/:addressId`
    async fn edit_address(
        &self,
        user_id: &str,
        address_id: &str,
        form: &AddressForm,
    ) -> Result<Address, ShopError>;

    /// `DELETE /shop/address/delete/:userId/:addressId`
    async fn delete_address(&self, user_id: &str, address_id: &str) -> Result<(), ShopError>;

    /// `POST /shop/order/create`
    async fn create_order(&self, order: &NewOrder) -> Result<OrderCreated, ShopError>;

    /// `GET /shop/order/list/:userId`
    async fn fetch_orders(&self, user_id: &str) -> Result<Vec<Order>, ShopError>;

    /// `GET /shop/order/details/:id`
    async fn fetch_order_details(&self, order_id: &str) -> Result<Order, ShopError>;

    /// `POST /auth/login`
    async fn login(&self, credentials: &Credentials) -> Result<User, ShopError>;

    /// `POST /auth/logout`
    async fn logout(&self) -> Result<(), ShopError>;

    /// `GET /auth/check-auth`
    async fn check_auth(&self) -> Result<User, ShopError>;
}
