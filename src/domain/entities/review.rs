//! Product review entity.

use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::id_string;

/// Lowest star rating accepted by the review form.
pub const MIN_RATING: u8 = 1;
/// Highest star rating accepted by the review form.
pub const MAX_RATING: u8 = 5;

/// A customer review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct Review {
    #[serde(rename = "_id", alias = "id", with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub review_message: String,
    #[serde(default)]
    pub review_value: u8,
}

/// Body of `POST /shop/review/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub struct ReviewForm {
    pub product_id: String,
    pub user_id: String,
    pub user_name: String,
    pub review_message: String,
    pub review_value: u8,
}

impl ReviewForm {
    /// Whether the form can be submitted: a rating in range and a message.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&self.review_value)
            && !self.review_message.trim().is_empty()
    }
}

/// Mean rating of `reviews`, 0 when empty.
#[must_use]
pub fn average_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let total: u32 = reviews.iter().map(|r| u32::from(r.review_value)).sum();
    f64::from(total) / f64::from(u32::try_from(reviews.len()).unwrap_or(u32::MAX))
}
