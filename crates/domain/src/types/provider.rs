//! Provider profile types

use serde::{Deserialize, Serialize};

/// Provider profile row, keyed 1:1 to a user by `user_id`.
///
/// The free-text fields come straight from the profile form and may be
/// empty. `price_range` is unstructured ("$25/hr", "Negotiable", ...);
/// the filter engine parses a leading dollar amount out of it when
/// bucketing by price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Provider {
    pub user_id: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub price_range: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub contact_link: String,
    #[serde(default)]
    pub profile_img_url: Option<String>,
}

/// Portfolio image row. Replaced wholesale on each profile save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioImage {
    pub provider_id: String,
    pub image_url: String,
}
