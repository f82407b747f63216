//! Detail composer - profile, portfolio and reviews for one provider

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use craftlink_domain::utils::rating;
use craftlink_domain::{
    CraftlinkError, DetailView, Result, ReviewWithAuthor, FALLBACK_DISPLAY_NAME,
    FALLBACK_REVIEWER_NAME,
};
use tracing::debug;

use crate::session::ports::AuthGateway;
use crate::store_ports::{PortfolioStore, ProviderStore, ReviewStore, UserStore};

/// Composes the expanded single-provider view.
///
/// Loads are keyed by a generation counter: starting a new load
/// supersedes any still in flight, and a superseded load discards its
/// result instead of clobbering the newer view.
pub struct DetailService {
    providers: Arc<dyn ProviderStore>,
    users: Arc<dyn UserStore>,
    portfolio: Arc<dyn PortfolioStore>,
    reviews: Arc<dyn ReviewStore>,
    auth: Arc<dyn AuthGateway>,
    generation: AtomicU64,
}

impl DetailService {
    /// Create a new detail service.
    pub fn new(
        providers: Arc<dyn ProviderStore>,
        users: Arc<dyn UserStore>,
        portfolio: Arc<dyn PortfolioStore>,
        reviews: Arc<dyn ReviewStore>,
        auth: Arc<dyn AuthGateway>,
    ) -> Self {
        Self { providers, users, portfolio, reviews, auth, generation: AtomicU64::new(0) }
    }

    /// Load the detail view for one provider.
    ///
    /// Returns `Ok(None)` when a newer load superseded this one before it
    /// finished. A missing provider is a [`CraftlinkError::NotFound`]
    /// error rather than a silent no-op.
    pub async fn load(&self, provider_id: &str) -> Result<Option<DetailView>> {
        let token = self.begin_load();

        let provider = self
            .providers
            .find_by_user(provider_id)
            .await?
            .ok_or_else(|| CraftlinkError::NotFound(format!("provider {provider_id}")))?;

        let display_name = match self.users.get(provider_id).await? {
            Some(user) => user.name,
            None => FALLBACK_DISPLAY_NAME.to_string(),
        };

        // Portfolio is unbounded here, unlike the 3-image cap applied in
        // the profile edit view.
        let (portfolio, reviews) = tokio::join!(
            self.portfolio.list_for_provider(provider_id, None),
            self.reviews.list_for_provider(provider_id),
        );
        let portfolio = portfolio?;
        let reviews = reviews?;

        let author_ids: Vec<String> = reviews.iter().map(|r| r.client_id.clone()).collect();
        let authors = if author_ids.is_empty() {
            Vec::new()
        } else {
            self.users.get_many(&author_ids).await?
        };
        let author_names: HashMap<&str, &str> =
            authors.iter().map(|u| (u.id.as_str(), u.name.as_str())).collect();

        let ratings: Vec<u8> = reviews.iter().map(|r| r.rating).collect();
        let (avg_rating, review_count) = rating::summarize(&ratings);

        let reviews: Vec<ReviewWithAuthor> = reviews
            .into_iter()
            .map(|review| {
                let author_name = author_names
                    .get(review.client_id.as_str())
                    .map_or(FALLBACK_REVIEWER_NAME, |name| *name)
                    .to_string();
                ReviewWithAuthor { review, author_name }
            })
            .collect();

        let viewer = self.auth.current_user().await?;
        let can_review = viewer.as_ref().is_some_and(|u| u.id != provider_id);

        if self.is_superseded(token) {
            debug!(provider_id, "detail load superseded by a newer request");
            return Ok(None);
        }

        Ok(Some(DetailView {
            provider,
            display_name,
            portfolio,
            reviews,
            avg_rating,
            review_count,
            can_review,
        }))
    }

    /// Issue the request token for a new load, superseding older ones.
    fn begin_load(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a newer load has started since `token` was issued.
    fn is_superseded(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != token
    }
}
