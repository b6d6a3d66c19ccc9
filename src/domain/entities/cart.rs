//! Shopping cart entity.

use serde::{Deserialize, Serialize};

use super::Product;
use crate::domain::serde_utils::{id_string, lenient_f64};

/// A line in the cart, denormalized from the product at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CartItem {
    #[serde(with = "id_string")]
    pub product_id: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub sale_price: f64,
    #[serde(default)]
    pub quantity: u32,
}

impl CartItem {
    /// Unit price the customer pays.
    #[must_use]
    pub fn unit_price(&self) -> f64 {
        if self.sale_price > 0.0 {
            self.sale_price
        } else {
            self.price
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.unit_price() * f64::from(self.quantity)
    }
}

/// The user's cart as returned by the cart endpoints.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Cart {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Sum of line totals.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Quantity currently held for `product_id`.
    #[must_use]
    pub fn quantity_of(&self, product_id: &str) -> u32 {
        self.items
            .iter()
            .find(|item| item.product_id == product_id)
            .map_or(0, |item| item.quantity)
    }

    /// Checks that one more unit of `product` fits in stock.
    ///
    /// # Errors
    /// Returns the number of units that can be held at most.
    pub fn check_can_add(&self, product: &Product) -> Result<(), u32> {
        if self.quantity_of(&product.id).saturating_add(1) > product.total_stock {
            Err(product.total_stock)
        } else {
            Ok(())
        }
    }
}

/// Body of `POST /shop/cart/add` and `PUT /shop/cart/update-cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct CartLineRequest {
    pub user_id: String,
    pub product_id: String,
    pub quantity: u32,
}

impl CartLineRequest {
    /// Request for `quantity` units of `product_id` in `user_id`'s cart.
    #[must_use]
    pub fn new(user_id: impl Into<String>, product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            user_id: user_id.into(),
            product_id: product_id.into(),
            quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, price: f64, sale_price: f64, quantity: u32) -> CartItem {
        CartItem {
            product_id: product_id.to_string(),
            image: None,
            title: product_id.to_uppercase(),
            price,
            sale_price,
            quantity,
        }
    }

    #[test]
    fn test_total_uses_sale_price_when_set() {
        let cart = Cart {
            id: None,
            user_id: "u1".to_string(),
            items: vec![item("a", 10.0, 0.0, 2), item("b", 50.0, 40.0, 1)],
        };

        assert!((cart.total() - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_stock_check() {
        let cart = Cart {
            id: None,
            user_id: "u1".to_string(),
            items: vec![item("a", 10.0, 0.0, 2)],
        };

        let product = Product::new("a", "A").with_stock(2);
        assert_eq!(cart.check_can_add(&product), Err(2));

        let product = Product::new("a", "A").with_stock(3);
        assert_eq!(cart.check_can_add(&product), Ok(()));

        let other = Product::new("b", "B").with_stock(1);
        assert_eq!(cart.check_can_add(&other), Ok(()));
    }

    #[test]
    fn test_stock_check_at_quantity_limit() {
        let json = r#"{"items": [{"productId": "a", "quantity": 4294967295}]}"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        let product = Product::new("a", "A").with_stock(5);
        assert_eq!(cart.check_can_add(&product), Err(5));
    }

    #[test]
    fn test_parse_cart_payload() {
        let json = r#"{
            "_id": "c1",
            "userId": "u1",
            "items": [
                {"productId": "p1", "title": "Drill", "price": 120, "salePrice": 0, "quantity": 2}
            ]
        }"#;
        let cart: Cart = serde_json::from_str(json).unwrap();

        assert_eq!(cart.id.as_deref(), Some("c1"));
        assert_eq!(cart.quantity_of("p1"), 2);
        assert!((cart.total() - 240.0).abs() < f64::EPSILON);
    }
}
