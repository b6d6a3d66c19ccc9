//! Order entity and checkout request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Address, Cart};
use crate::domain::serde_utils::{id_string, lenient_f64};

/// Payment provider used for checkout.
pub const PAYMENT_METHOD: &str = "paypal";
/// Status of a freshly created order and its payment.
pub const STATUS_PENDING: &str = "pending";

/// A line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct OrderItem {
    #[serde(with = "id_string")]
    pub product_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price: f64,
    #[serde(default)]
    pub quantity: u32,
}

/// Delivery address snapshot stored on the order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AddressInfo {
    #[serde(default)]
    pub address_id: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub notes: String,
}

impl From<&Address> for AddressInfo {
    fn from(address: &Address) -> Self {
        Self {
            address_id: address.id.clone(),
            address: address.address.clone(),
            city: address.city.clone(),
            pincode: address.pincode.clone(),
            phone: address.phone.clone(),
            notes: address.notes.clone(),
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Order {
    #[serde(rename = "_id", alias = "id", with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub cart_items: Vec<OrderItem>,
    #[serde(default)]
    pub address_info: AddressInfo,
    #[serde(default)]
    pub order_status: String,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub total_amount: f64,
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub order_update_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub payment_id: String,
    #[serde(default)]
    pub payer_id: String,
}

/// Body of `POST /shop/order/create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct NewOrder {
    pub user_id: String,
    pub cart_id: Option<String>,
    pub cart_items: Vec<OrderItem>,
    pub address_info: AddressInfo,
    pub order_status: String,
    pub payment_method: String,
    pub payment_status: String,
    pub total_amount: f64,
    pub order_date: DateTime<Utc>,
    pub order_update_date: DateTime<Utc>,
    pub payment_id: String,
    pub payer_id: String,
}

impl NewOrder {
    /// Builds a pending order for everything in `cart`, shipped to `address`.
    #[must_use]
    pub fn from_cart(user_id: impl Into<String>, cart: &Cart, address: &Address, now: DateTime<Utc>) -> Self {
        let cart_items = cart
            .items
            .iter()
            .map(|item| OrderItem {
                product_id: item.product_id.clone(),
                title: item.title.clone(),
                image: item.image.clone(),
                price: item.unit_price(),
                quantity: item.quantity,
            })
            .collect();

        Self {
            user_id: user_id.into(),
            cart_id: cart.id.clone(),
            cart_items,
            address_info: AddressInfo::from(address),
            order_status: STATUS_PENDING.to_string(),
            payment_method: PAYMENT_METHOD.to_string(),
            payment_status: STATUS_PENDING.to_string(),
            total_amount: cart.total(),
            order_date: now,
            order_update_date: now,
            payment_id: String::new(),
            payer_id: String::new(),
        }
    }
}

/// Result of creating an order: where the customer approves the payment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct OrderCreated {
    pub approval_url: String,
    pub order_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CartItem;

    #[test]
    fn test_new_order_from_cart() {
        let cart = Cart {
            id: Some("c1".to_string()),
            user_id: "u1".to_string(),
            items: vec![CartItem {
                product_id: "p1".to_string(),
                image: None,
                title: "Drill".to_string(),
                price: 120.0,
                sale_price: 100.0,
                quantity: 2,
            }],
        };
        let address: Address =
            serde_json::from_str(r#"{"_id": "a1", "address": "12 Elm St", "city": "Springfield"}"#)
                .unwrap();
        let now = Utc::now();

        let order = NewOrder::from_cart("u1", &cart, &address, now);

        assert_eq!(order.cart_id.as_deref(), Some("c1"));
        assert_eq!(order.address_info.address_id, "a1");
        assert_eq!(order.cart_items.len(), 1);
        assert!((order.cart_items[0].price - 100.0).abs() < f64::EPSILON);
        assert!((order.total_amount - 200.0).abs() < f64::EPSILON);
        assert_eq!(order.payment_method, PAYMENT_METHOD);
        assert_eq!(order.order_status, STATUS_PENDING);
    }

    #[test]
    fn test_parse_order_with_dates() {
        let json = r#"{
            "_id": "o1",
            "userId": "u1",
            "cartItems": [{"productId": "p1", "title": "Drill", "price": "100", "quantity": 1}],
            "orderStatus": "confirmed",
            "totalAmount": 100,
            "orderDate": "2024-08-01T10:00:00.000Z"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();

        assert_eq!(order.order_status, "confirmed");
        assert!(order.order_date.is_some());
        assert!(order.order_update_date.is_none());
        assert!((order.cart_items[0].price - 100.0).abs() < f64::EPSILON);
    }
}
