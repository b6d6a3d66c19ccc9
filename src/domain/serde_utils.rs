//! Serde utilities for shop records.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Record identifiers arrive as Mongo object-id strings, but fixtures and
/// older endpoints send plain integers. Both are kept as strings.
pub mod id_string {
    use super::{Deserializer, Serializer, Visitor, de, fmt};

    /// Serializes the identifier as a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S>(value: &str, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value)
    }

    /// Deserializes an identifier from a string or integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a string nor an integer.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StringOrIntVisitor;

        impl Visitor<'_> for StringOrIntVisitor {
            type Value = String;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or integer record id")
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value.to_string())
            }
        }

        deserializer.deserialize_any(StringOrIntVisitor)
    }
}

/// Prices and counters that the backend occasionally sends as strings
/// (form fields stored verbatim) or as `null`.
pub mod lenient_f64 {
    use super::{Deserializer, Visitor, de, fmt};

    /// Deserializes a number from a number, numeric string or null (zero).
    ///
    /// # Errors
    ///
    /// Returns an error if a string value is not numeric.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NumberVisitor;

        impl<'de> Visitor<'de> for NumberVisitor {
            type Value = f64;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number, numeric string or null")
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value)
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value as f64)
            }

            #[allow(clippy::cast_precision_loss)]
            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(value as f64)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Ok(0.0);
                }
                trimmed.parse::<f64>().map_err(de::Error::custom)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0.0)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(0.0)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(NumberVisitor)
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Record {
        #[serde(with = "super::id_string")]
        id: String,
        #[serde(default, deserialize_with = "super::lenient_f64::deserialize")]
        price: f64,
    }

    #[test]
    fn test_integer_id_becomes_string() {
        let record: Record = serde_json::from_str(r#"{"id": 42, "price": 3}"#).unwrap();
        assert_eq!(record.id, "42");
        assert!((record.price - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_string_price_and_null() {
        let record: Record = serde_json::from_str(r#"{"id": "a1", "price": "12.5"}"#).unwrap();
        assert!((record.price - 12.5).abs() < f64::EPSILON);

        let record: Record = serde_json::from_str(r#"{"id": "a1", "price": null}"#).unwrap();
        assert!(record.price.abs() < f64::EPSILON);
    }

    #[test]
    fn test_non_numeric_price_is_error() {
        let result = serde_json::from_str::<Record>(r#"{"id": "a1", "price": "cheap"}"#);
        assert!(result.is_err());
    }
}
