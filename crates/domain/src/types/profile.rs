//! Profile editing types

use serde::{Deserialize, Serialize};

use super::provider::{PortfolioImage, Provider};

/// An image payload picked in the profile form, ready for upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpload {
    /// Original file name; only the extension is kept for the object key.
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// File extension (without the dot), defaulting to "bin".
    pub fn extension(&self) -> &str {
        self.file_name.rsplit_once('.').map_or("bin", |(_, ext)| ext)
    }
}

/// Everything a provider submits when saving their profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub bio: String,
    pub skills: String,
    pub price_range: String,
    pub location: String,
    pub availability: String,
    pub contact_link: String,
    /// Replacement profile photo, when one was picked.
    #[serde(skip)]
    pub profile_photo: Option<ImageUpload>,
    /// Replacement portfolio images; capped at `MAX_PORTFOLIO_IMAGES`.
    #[serde(skip)]
    pub portfolio: Vec<ImageUpload>,
}

/// A provider's own profile as loaded into the edit form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnProfile {
    pub provider: Provider,
    pub portfolio: Vec<PortfolioImage>,
}
