//! What a view asks the app to do in response to a key.

use crate::domain::entities::{Address, AddressForm, Product};
use crate::domain::filter::{FilterParams, SortOption};

/// Top-level shop views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(missing_docs)]
pub enum Tab {
    #[default]
    Home,
    Listing,
    Search,
    Cart,
    Account,
}

impl Tab {
    /// Tabs in header order.
    pub const ALL: [Self; 5] = [Self::Home, Self::Listing, Self::Search, Self::Cart, Self::Account];

    /// Header label.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Listing => "Products",
            Self::Search => "Search",
            Self::Cart => "Cart",
            Self::Account => "Account",
        }
    }

    /// Function key that switches to the tab.
    #[must_use]
    pub const fn shortcut(self) -> &'static str {
        match self {
            Self::Home => "F1",
            Self::Listing => "F2",
            Self::Search => "F3",
            Self::Cart => "F4",
            Self::Account => "F5",
        }
    }

    /// Tab bound to F`n`.
    #[must_use]
    pub const fn from_function_key(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Home),
            2 => Some(Self::Listing),
            3 => Some(Self::Search),
            4 => Some(Self::Cart),
            5 => Some(Self::Account),
            _ => None,
        }
    }
}

/// Result of a key press in a shop view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    /// Key handled locally, or ignored.
    Consumed,
    /// Open the listing with exactly these filters.
    OpenListing(FilterParams),
    /// Re-fetch the listing.
    FetchListing {
        /// Selected filters.
        filters: FilterParams,
        /// Sort order.
        sort: SortOption,
    },
    /// Search for the keyword.
    Search(String),
    /// Clear search results.
    ResetSearch,
    /// Fetch the product and open its details.
    OpenDetails(String),
    /// Close the details overlay.
    CloseDetails,
    /// Add one unit of the product to the cart.
    AddToCart(Product),
    /// Post a review for the open product.
    SubmitReview {
        /// Stars, 1 to 5.
        rating: u8,
        /// Review text.
        message: String,
    },
    /// Set the quantity of a cart line.
    UpdateQuantity {
        /// Product of the line.
        product_id: String,
        /// New quantity, at least 1.
        quantity: u32,
    },
    /// Remove the product from the cart.
    RemoveFromCart(String),
    /// Place an order for the cart, shipped to the address.
    Checkout(Address),
    /// Fetch and show an order.
    ShowOrder(String),
    /// Close the order details.
    CloseOrder,
    /// Create or update an address.
    SaveAddress {
        /// Address to update; `None` adds a new one.
        address_id: Option<String>,
        /// Entered fields.
        form: AddressForm,
    },
    /// Delete the address.
    DeleteAddress(String),
    /// Show a message in the status bar.
    Notice(String),
}
