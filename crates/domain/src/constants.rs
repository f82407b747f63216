//! Domain constants

/// Maximum number of portfolio images retained per provider.
///
/// Profile saves replace the portfolio wholesale; anything beyond this
/// count is dropped before upload.
pub const MAX_PORTFOLIO_IMAGES: usize = 3;

/// Display name used when a provider's user record cannot be resolved.
pub const FALLBACK_DISPLAY_NAME: &str = "Provider";

/// Author name used when a review's client record cannot be resolved.
pub const FALLBACK_REVIEWER_NAME: &str = "Anonymous";

/// Lowest accepted review rating.
pub const MIN_RATING: u8 = 1;

/// Highest accepted review rating.
pub const MAX_RATING: u8 = 5;
