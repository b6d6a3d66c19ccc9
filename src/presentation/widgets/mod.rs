mod header_bar;
mod input;
mod product_list;
mod status_bar;

pub use header_bar::{HeaderBar, HeaderBarStyle};
pub use input::TextInput;
pub use product_list::{ProductList, ProductListState, price_spans};
pub use status_bar::{StatusBar, StatusLevel};
