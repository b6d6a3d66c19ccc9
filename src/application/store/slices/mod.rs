//! Store slices.

mod address;
mod auth;
mod cart;
mod feature;
mod order;
mod products;
mod review;
mod search;

pub use address::{AddressAction, AddressSlice};
pub use auth::{AuthAction, AuthSlice};
pub use cart::{CartAction, CartSlice};
pub use feature::{FeatureAction, FeatureSlice};
pub use order::{OrderAction, OrderSlice};
pub use products::{ProductsAction, ProductsSlice};
pub use review::{ReviewAction, ReviewSlice};
pub use search::{SearchAction, SearchSlice};
