//! Domain entity definitions.

mod address;
mod cart;
mod feature;
mod order;
mod product;
mod review;
mod user;

pub use address::{Address, AddressForm};
pub use cart::{Cart, CartItem, CartLineRequest};
pub use feature::FeatureImage;
pub use order::{AddressInfo, NewOrder, Order, OrderCreated, OrderItem};
pub use product::Product;
pub use review::{MAX_RATING, MIN_RATING, Review, ReviewForm, average_rating};
pub use user::{Credentials, Role, User};
