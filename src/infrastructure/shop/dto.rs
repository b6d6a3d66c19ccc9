use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::entities::{OrderCreated, User};
use crate::domain::errors::ShopError;

/// Standard response envelope: `{ success, data }`.
///
/// A server `message` stays in the raw body carried by the error.
#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
}

/// Envelope of the auth endpoints, which carry `user` instead of `data`.
#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct AuthEnvelope {
    #[serde(default)]
    pub success: bool,
    pub user: Option<User>,
}

/// Response of `POST /shop/order/create`.
#[derive(Debug, Deserialize)]
#[allow(missing_docs)]
pub struct OrderCreatedResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(rename = "approvalURL")]
    pub approval_url: Option<String>,
    #[serde(rename = "orderId")]
    pub order_id: Option<String>,
}

/// Decodes `body` as `T`, keeping the raw body when the decode fails.
fn decode<T: DeserializeOwned>(body: &Value) -> Result<T, ShopError> {
    T::deserialize(body).map_err(|e| ShopError::malformed(e.to_string()))
}

/// Unwraps the payload of a standard envelope.
///
/// # Errors
/// `success: false` or a missing `data` field yields [`ShopError::NoData`]
/// carrying the body; a body of the wrong shape yields
/// [`ShopError::Malformed`].
pub fn unwrap_data<T: DeserializeOwned>(body: Value) -> Result<T, ShopError> {
    let envelope: Envelope<Value> = decode(&body)?;
    match envelope.data {
        Some(data) if envelope.success && !data.is_null() => decode(&data),
        _ => Err(ShopError::NoData {
            payload: Some(body),
        }),
    }
}

/// Checks a standard envelope whose payload is irrelevant.
///
/// # Errors
/// `success: false` yields [`ShopError::NoData`].
pub fn unwrap_success(body: Value) -> Result<(), ShopError> {
    let envelope: Envelope<Value> = decode(&body)?;
    if envelope.success {
        Ok(())
    } else {
        Err(ShopError::NoData {
            payload: Some(body),
        })
    }
}

/// Unwraps the user of an auth envelope.
///
/// # Errors
/// A failed envelope or a missing user yields [`ShopError::NoData`].
pub fn unwrap_user(body: Value) -> Result<User, ShopError> {
    let envelope: AuthEnvelope = decode(&body)?;
    match envelope.user {
        Some(user) if envelope.success => Ok(user),
        _ => Err(ShopError::NoData {
            payload: Some(body),
        }),
    }
}

/// Unwraps the approval link of a created order.
///
/// # Errors
/// Missing `approvalURL` or `orderId` yields [`ShopError::NoData`].
pub fn unwrap_order_created(body: Value) -> Result<OrderCreated, ShopError> {
    let response: OrderCreatedResponse = decode(&body)?;
    match (response.success, response.approval_url, response.order_id) {
        (true, Some(approval_url), Some(order_id)) => Ok(OrderCreated {
            approval_url,
            order_id,
        }),
        _ => Err(ShopError::NoData {
            payload: Some(body),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Product;
    use serde_json::json;

    #[test]
    fn test_unwrap_data() {
        let products: Vec<Product> =
            unwrap_data(json!({"success": true, "data": [{"id": 1, "name": "Drill"}]})).unwrap();
        assert_eq!(products, vec![Product::new("1", "Drill")]);
    }

    #[test]
    fn test_unsuccessful_envelope_keeps_body() {
        let body = json!({"success": false, "message": "Product not found!"});
        let error = unwrap_data::<Product>(body.clone()).unwrap_err();

        assert!(matches!(error, ShopError::NoData { .. }));
        assert_eq!(error.rejection_payload(), body);
        assert_eq!(error.user_message(), "Product not found!");
    }

    #[test]
    fn test_missing_or_null_data_is_no_data() {
        assert!(matches!(
            unwrap_data::<Vec<Product>>(json!({"success": true})),
            Err(ShopError::NoData { .. })
        ));
        assert!(matches!(
            unwrap_data::<Vec<Product>>(json!({"success": true, "data": null})),
            Err(ShopError::NoData { .. })
        ));
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        assert!(matches!(
            unwrap_data::<Vec<Product>>(json!({"success": true, "data": 42})),
            Err(ShopError::Malformed { .. })
        ));
        assert!(matches!(
            unwrap_data::<Vec<Product>>(json!("<html>")),
            Err(ShopError::Malformed { .. })
        ));
    }

    #[test]
    fn test_unwrap_user() {
        let user = unwrap_user(json!({
            "success": true,
            "message": "Logged in successfully",
            "user": {"email": "ada@example.com", "role": "user", "id": "u1", "userName": "Ada"}
        }))
        .unwrap();

        assert_eq!(user.id(), "u1");
        assert_eq!(user.user_name(), "Ada");
        assert!(unwrap_user(json!({"success": false, "message": "Unauthorised user!"})).is_err());
    }

    #[test]
    fn test_unwrap_order_created() {
        let created = unwrap_order_created(json!({
            "success": true,
            "approvalURL": "https://www.sandbox.paypal.com/checkoutnow?token=T",
            "orderId": "o1"
        }))
        .unwrap();

        assert_eq!(created.order_id, "o1");
        assert!(unwrap_order_created(json!({"success": false})).is_err());
    }

    #[test]
    fn test_unwrap_success() {
        assert!(unwrap_success(json!({"success": true, "message": "Address deleted successfully"})).is_ok());
        assert!(unwrap_success(json!({"success": false})).is_err());
    }
}
