//! Shopping cart slice.

use crate::application::store::fetch::{Fetch, FetchStatus, Outcome, ResponseOrdering};
use crate::application::store::Slice;
use crate::domain::entities::Cart;

/// Every cart action answers with the updated cart.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// `POST /shop/cart/add`.
    AddToCart(Fetch<Cart>),
    /// `GET /shop/cart/get/:user`.
    FetchCartItems(Fetch<Cart>),
    /// `DELETE /shop/cart/:user/:product`.
    DeleteCartItem(Fetch<Cart>),
    /// `PUT /shop/cart/update-cart`.
    UpdateCartQuantity(Fetch<Cart>),
}

impl CartAction {
    /// Action type string.
    #[must_use]
    pub fn type_name(&self) -> String {
        let (name, label) = match self {
            Self::AddToCart(f) => ("addToCart", f.phase.label()),
            Self::FetchCartItems(f) => ("fetchCartItems", f.phase.label()),
            Self::DeleteCartItem(f) => ("deleteCartItem", f.phase.label()),
            Self::UpdateCartQuantity(f) => ("updateCartQuantity", f.phase.label()),
        };
        format!("cart/{name}/{label}")
    }

    fn into_fetch(self) -> Fetch<Cart> {
        match self {
            Self::AddToCart(f)
            | Self::FetchCartItems(f)
            | Self::DeleteCartItem(f)
            | Self::UpdateCartQuantity(f) => f,
        }
    }
}

/// Cart state.
#[derive(Debug, Clone, Default)]
pub struct CartSlice {
    status: FetchStatus,
    cart_items: Option<Cart>,
}

impl CartSlice {
    /// Last cart returned by the server.
    #[must_use]
    pub const fn cart(&self) -> Option<&Cart> {
        self.cart_items.as_ref()
    }

    /// Number of lines, 0 without a cart.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.cart_items.as_ref().map_or(0, |cart| cart.items.len())
    }
}

impl Slice for CartSlice {
    type Action = CartAction;

    fn reduce(mut self, action: CartAction, ordering: ResponseOrdering) -> Self {
        match self.status.observe(action.into_fetch(), ordering) {
            Outcome::Replace(cart) => self.cart_items = Some(cart),
            Outcome::Clear => self.cart_items = None,
            Outcome::Ignore => {}
        }
        self
    }

    fn is_loading(&self) -> bool {
        self.status.is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::store::fetch::RequestId;
    use crate::domain::errors::ShopError;
    use serde_json::json;

    fn cart(lines: usize) -> Cart {
        let items: Vec<_> = (0..lines)
            .map(|i| json!({"productId": format!("p{i}"), "price": 10, "quantity": 1}))
            .collect();
        serde_json::from_value(json!({"userId": "u1", "items": items})).unwrap()
    }

    #[test]
    fn test_any_cart_action_replaces_cart() {
        let slice = CartSlice::default()
            .reduce(CartAction::FetchCartItems(Fetch::fulfilled(RequestId(1), cart(2))), ResponseOrdering::LastResolved)
            .reduce(CartAction::DeleteCartItem(Fetch::fulfilled(RequestId(2), cart(1))), ResponseOrdering::LastResolved);

        assert_eq!(slice.item_count(), 1);
    }

    #[test]
    fn test_failed_update_empties_cart() {
        let slice = CartSlice::default()
            .reduce(CartAction::FetchCartItems(Fetch::fulfilled(RequestId(1), cart(3))), ResponseOrdering::LastResolved)
            .reduce(CartAction::UpdateCartQuantity(Fetch::pending(RequestId(2))), ResponseOrdering::LastResolved)
            .reduce(
                CartAction::UpdateCartQuantity(Fetch::rejected(RequestId(2), ShopError::network("reset"))),
                ResponseOrdering::LastResolved,
            );

        assert!(!slice.is_loading());
        assert!(slice.cart().is_none());
        assert_eq!(slice.item_count(), 0);
    }
}
