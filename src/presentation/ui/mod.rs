//! UI screens.

mod account_screen;
mod app;
mod carousel_timer;
mod cart_screen;
mod command;
mod details_overlay;
mod home_screen;
mod listing_screen;
mod login_screen;
mod search_screen;
#[cfg(test)]
mod test_support;

pub use account_screen::{AccountFocus, AccountScreen, AccountScreenState, MAX_ADDRESSES};
pub use app::App;
pub use carousel_timer::CarouselTimer;
pub use cart_screen::{CartFocus, CartScreen, CartScreenState};
pub use command::{Tab, ViewCommand};
pub use details_overlay::{DetailsOverlay, DetailsOverlayState};
pub use home_screen::{HomeFocus, HomeScreen, HomeScreenState};
pub use listing_screen::{ListingFocus, ListingScreen, ListingScreenState};
pub use login_screen::{LoginAction, LoginScreen, LoginState};
pub use search_screen::{MIN_KEYWORD_LEN, SearchScreen, SearchScreenState};
