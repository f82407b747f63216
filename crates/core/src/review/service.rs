//! Review submission - validation, insert and directory refresh

use std::sync::Arc;

use craftlink_domain::{CraftlinkError, NewReview, Result, MAX_RATING, MIN_RATING};
use tracing::{info, warn};

use crate::directory::DirectoryService;
use crate::session::ports::AuthGateway;
use crate::store_ports::ReviewStore;

/// Validates and submits client reviews.
///
/// Uniqueness per (provider, client) is enforced by the table store's
/// composite unique key; this service maps the resulting conflict to a
/// user-facing duplicate rejection instead of pre-checking and racing.
pub struct ReviewService {
    auth: Arc<dyn AuthGateway>,
    reviews: Arc<dyn ReviewStore>,
    directory: Arc<DirectoryService>,
}

impl ReviewService {
    /// Create a new review service.
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        reviews: Arc<dyn ReviewStore>,
        directory: Arc<DirectoryService>,
    ) -> Self {
        Self { auth, reviews, directory }
    }

    /// Submit a review for `provider_id`.
    ///
    /// Preconditions are checked in order, each with its own rejection:
    /// 1. the caller is signed in,
    /// 2. the caller is not the provider,
    /// 3. the rating is in `1..=5` (zero means "nothing selected"),
    /// 4. the caller has not already reviewed this provider.
    ///
    /// On success the directory is fully reloaded so aggregates pick up
    /// the new review.
    pub async fn submit(&self, provider_id: &str, rating: u8, comment: &str) -> Result<()> {
        let user = self
            .auth
            .current_user()
            .await?
            .ok_or_else(|| CraftlinkError::Auth("please sign in to leave a review".into()))?;

        if user.id == provider_id {
            return Err(CraftlinkError::InvalidInput(
                "you cannot review your own profile".into(),
            ));
        }

        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(CraftlinkError::InvalidInput("please select a rating".into()));
        }

        let review = NewReview {
            provider_id: provider_id.to_string(),
            client_id: user.id.clone(),
            rating,
            comment: comment.to_string(),
        };

        match self.reviews.insert(&review).await {
            Ok(()) => {}
            Err(CraftlinkError::Duplicate(_)) => {
                return Err(CraftlinkError::Duplicate(
                    "you have already reviewed this provider".into(),
                ));
            }
            Err(err) => return Err(err),
        }

        info!(provider_id, client_id = %user.id, rating, "review submitted");

        // Full reload rather than an incremental patch; a failed refresh
        // does not undo a successful submission.
        if let Err(err) = self.directory.reload().await {
            warn!(error = %err, "directory reload after review submission failed");
        }

        Ok(())
    }
}
