//! Application layer: the state store and the actions that feed it.

mod dispatcher;
pub mod store;

pub use dispatcher::{Dispatcher, FetchHandle};
pub use store::{AppState, Slice, Store, StoreAction};
