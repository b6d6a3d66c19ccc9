//! Domain error types.

mod shop_error;

pub use shop_error::ShopError;
