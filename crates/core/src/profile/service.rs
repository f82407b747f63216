//! Profile save flow - image uploads and provider upsert

use std::sync::Arc;

use chrono::Utc;
use craftlink_domain::{
    CraftlinkError, ImageUpload, OwnProfile, ProfileDraft, Provider, Result, Role,
    MAX_PORTFOLIO_IMAGES,
};
use tracing::{info, warn};

use crate::session::ports::{AuthGateway, AuthUser};
use crate::store_ports::{ObjectStore, PortfolioStore, ProviderStore, UserStore};

/// Storage bucket for profile photos.
const PROFILE_PHOTO_BUCKET: &str = "profile-photos";

/// Storage bucket for portfolio images.
const PORTFOLIO_BUCKET: &str = "portfolio-images";

/// Saves and loads a provider's own profile.
pub struct ProfileService {
    auth: Arc<dyn AuthGateway>,
    users: Arc<dyn UserStore>,
    providers: Arc<dyn ProviderStore>,
    portfolio: Arc<dyn PortfolioStore>,
    objects: Arc<dyn ObjectStore>,
}

impl ProfileService {
    /// Create a new profile service.
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        users: Arc<dyn UserStore>,
        providers: Arc<dyn ProviderStore>,
        portfolio: Arc<dyn PortfolioStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self { auth, users, providers, portfolio, objects }
    }

    /// Save the caller's provider profile.
    ///
    /// The profile photo upload, the provider upsert and the portfolio
    /// row replacement abort the whole save on first error. Individual
    /// portfolio image uploads are the one tolerated partial failure:
    /// a failed upload is logged and skipped so one bad image does not
    /// lose the rest of the form.
    pub async fn save(&self, draft: &ProfileDraft) -> Result<()> {
        let user = self.require_user().await?;

        let profile_img_url = match &draft.profile_photo {
            Some(photo) => Some(self.upload_photo(&user.id, photo).await?),
            None => None,
        };

        let portfolio_urls = self.upload_portfolio(&user.id, &draft.portfolio).await;

        let provider = Provider {
            user_id: user.id.clone(),
            bio: draft.bio.clone(),
            skills: draft.skills.clone(),
            price_range: draft.price_range.clone(),
            location: draft.location.clone(),
            availability: draft.availability.clone(),
            contact_link: draft.contact_link.clone(),
            profile_img_url,
        };

        if self.providers.find_by_user(&user.id).await?.is_some() {
            self.providers.update(&provider).await?;
        } else {
            self.providers.insert(&provider).await?;
        }

        // Wholesale replacement, and only when at least one upload made
        // it through; an all-failed batch keeps the old portfolio.
        if !portfolio_urls.is_empty() {
            self.portfolio.replace_for_provider(&user.id, &portfolio_urls).await?;
        }

        info!(user_id = %user.id, portfolio = portfolio_urls.len(), "provider profile saved");
        Ok(())
    }

    /// Load the caller's own profile for editing.
    ///
    /// Requires a provider account; the portfolio is capped at
    /// [`MAX_PORTFOLIO_IMAGES`] to match the edit form.
    pub async fn load_own(&self) -> Result<Option<OwnProfile>> {
        let user = self.require_user().await?;

        let role = match &user.metadata_role {
            Some(raw) => Role::parse_lenient(raw),
            None => self.users.role_of(&user.id).await?.unwrap_or(Role::Client),
        };
        if role != Role::Provider {
            return Err(CraftlinkError::Auth("a provider account is required".into()));
        }

        let Some(provider) = self.providers.find_by_user(&user.id).await? else {
            return Ok(None);
        };

        let portfolio =
            self.portfolio.list_for_provider(&user.id, Some(MAX_PORTFOLIO_IMAGES)).await?;

        Ok(Some(OwnProfile { provider, portfolio }))
    }

    async fn require_user(&self) -> Result<AuthUser> {
        self.auth
            .current_user()
            .await?
            .ok_or_else(|| CraftlinkError::Auth("you must be logged in".into()))
    }

    async fn upload_photo(&self, user_id: &str, photo: &ImageUpload) -> Result<String> {
        let path = object_path(user_id, 0, photo);
        self.objects.upload(PROFILE_PHOTO_BUCKET, &path, photo, true).await
    }

    async fn upload_portfolio(&self, user_id: &str, images: &[ImageUpload]) -> Vec<String> {
        let mut urls = Vec::new();
        for (index, image) in images.iter().take(MAX_PORTFOLIO_IMAGES).enumerate() {
            let path = object_path(user_id, index, image);
            match self.objects.upload(PORTFOLIO_BUCKET, &path, image, true).await {
                Ok(url) => urls.push(url),
                Err(err) => {
                    warn!(user_id, index, error = %err, "portfolio upload failed, skipping image");
                }
            }
        }
        urls
    }
}

/// Object key scheme: `<user>/<millis>_<index>.<ext>`.
///
/// The timestamp keeps successive saves from colliding while leaving
/// everything under the owner's prefix.
fn object_path(user_id: &str, index: usize, upload: &ImageUpload) -> String {
    format!("{user_id}/{}_{index}.{}", Utc::now().timestamp_millis(), upload.extension())
}
