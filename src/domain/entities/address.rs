//! Delivery address entity.

use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::id_string;

/// A saved delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Address {
    #[serde(rename = "_id", alias = "id", with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub user_id: String,
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

impl Address {
    /// One-line rendering used in lists.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}, {} {} ({})", self.address, self.city, self.pincode, self.phone)
    }
}

/// Body of the address add/update endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct AddressForm {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub user_id: String,
    pub address: String,
    pub city: String,
    pub pincode: String,
    pub phone: String,
    pub notes: String,
}

impl AddressForm {
    /// Address, city, pincode and phone are required; notes are optional.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.address, &self.city, &self.pincode, &self.phone]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_requires_core_fields() {
        let mut form = AddressForm {
            user_id: "u1".to_string(),
            address: "12 Elm St".to_string(),
            city: "Springfield".to_string(),
            pincode: "12345".to_string(),
            phone: String::new(),
            notes: String::new(),
        };
        assert!(!form.is_complete());

        form.phone = "555-0100".to_string();
        assert!(form.is_complete());
    }

    #[test]
    fn test_summary() {
        let address: Address = serde_json::from_str(
            r#"{"_id": "a1", "userId": "u1", "address": "12 Elm St", "city": "Springfield", "pincode": "12345", "phone": "555"}"#,
        )
        .unwrap();
        assert_eq!(address.summary(), "12 Elm St, Springfield 12345 (555)");
        assert!(address.notes.is_empty());
    }
}
