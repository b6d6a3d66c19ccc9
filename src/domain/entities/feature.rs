//! Home page feature banner.

use serde::{Deserialize, Serialize};

use crate::domain::serde_utils::id_string;

/// A banner image shown in the home carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct FeatureImage {
    #[serde(rename = "_id", alias = "id", with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub image: Option<String>,
}
