//! Shop product entity.

use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::{id_string, lenient_f64};

/// A product listed in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend record id.
    #[serde(rename = "_id", alias = "id", with = "id_string")]
    pub id: String,
    /// Image URL.
    #[serde(default)]
    pub image: Option<String>,
    /// Display title.
    #[serde(default, alias = "name")]
    pub title: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Category id (see [`crate::domain::filter::CATEGORIES`]).
    #[serde(default)]
    pub category: String,
    /// Brand or service id (see [`crate::domain::filter::BRANDS`]).
    #[serde(default)]
    pub brand: String,
    /// List price.
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub price: f64,
    /// Sale price; zero when the product is not on sale.
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub sale_price: f64,
    /// Units in stock.
    #[serde(default)]
    pub total_stock: u32,
    /// Mean review score, 0 when unreviewed.
    #[serde(default, deserialize_with = "lenient_f64::deserialize")]
    pub average_review: f64,
}

impl Product {
    /// Creates a product with only an id and title set.
    #[must_use]
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            image: None,
            title: title.into(),
            description: String::new(),
            category: String::new(),
            brand: String::new(),
            price: 0.0,
            sale_price: 0.0,
            total_stock: 0,
            average_review: 0.0,
        }
    }

    /// Sets list and sale price.
    #[must_use]
    pub const fn with_price(mut self, price: f64, sale_price: f64) -> Self {
        self.price = price;
        self.sale_price = sale_price;
        self
    }

    /// Sets the stock count.
    #[must_use]
    pub const fn with_stock(mut self, total_stock: u32) -> Self {
        self.total_stock = total_stock;
        self
    }

    /// Whether a sale price applies.
    #[must_use]
    pub fn is_on_sale(&self) -> bool {
        self.sale_price > 0.0
    }

    /// Price the customer pays.
    #[must_use]
    pub fn effective_price(&self) -> f64 {
        if self.is_on_sale() {
            self.sale_price
        } else {
            self.price
        }
    }

    /// Whether no stock is left.
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.total_stock == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_product() {
        let json = r#"{
            "_id": "66b0c1",
            "image": "https://res.cloudinary.com/x.jpg",
            "title": "Cordless Drill",
            "description": "18V",
            "category": "homeEssentials",
            "brand": "fix",
            "price": 120,
            "salePrice": 99.5,
            "totalStock": 4,
            "averageReview": 4.5
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.id, "66b0c1");
        assert_eq!(product.brand, "fix");
        assert_eq!(product.total_stock, 4);
        assert!(product.is_on_sale());
        assert!((product.effective_price() - 99.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_minimal_record() {
        let product: Product = serde_json::from_str(r#"{"id": 1, "name": "Drill"}"#).unwrap();

        assert_eq!(product, Product::new("1", "Drill"));
        assert!(product.is_out_of_stock());
    }

    #[test]
    fn test_effective_price_without_sale() {
        let product = Product::new("p", "Hammer").with_price(25.0, 0.0);
        assert!(!product.is_on_sale());
        assert!((product.effective_price() - 25.0).abs() < f64::EPSILON);
    }
}
