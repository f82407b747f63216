//! Port interfaces over the hosted table and object stores
//!
//! These traits define the boundaries between core business logic and
//! the hosted-backend adapters in the infra crate.

use async_trait::async_trait;
use craftlink_domain::{
    ImageUpload, NewReview, PortfolioImage, Provider, Result, Review, Role, User,
};

/// Read/write access to the users table.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get a user by id.
    async fn get(&self, id: &str) -> Result<Option<User>>;

    /// Get all users whose id is in `ids`. Missing ids are simply absent
    /// from the result; no particular order is guaranteed.
    async fn get_many(&self, ids: &[String]) -> Result<Vec<User>>;

    /// Insert a new user row (at signup only).
    async fn insert(&self, user: &User) -> Result<()>;

    /// Look up a user's role by id.
    async fn role_of(&self, id: &str) -> Result<Option<Role>>;
}

/// Read/write access to the providers table.
#[async_trait]
pub trait ProviderStore: Send + Sync {
    /// Fetch every provider profile.
    async fn list_all(&self) -> Result<Vec<Provider>>;

    /// Fetch a single provider by its owning user id.
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Provider>>;

    /// Create a provider profile.
    async fn insert(&self, provider: &Provider) -> Result<()>;

    /// Update the profile owned by `provider.user_id`.
    async fn update(&self, provider: &Provider) -> Result<()>;
}

/// Read/write access to the reviews table.
///
/// The store enforces at most one review per (provider, client) pair via
/// a composite unique key; a violation surfaces as
/// [`craftlink_domain::CraftlinkError::Duplicate`].
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Fetch the whole reviews table (used for directory aggregates).
    async fn list_all(&self) -> Result<Vec<Review>>;

    /// Fetch one provider's reviews, newest first.
    async fn list_for_provider(&self, provider_id: &str) -> Result<Vec<Review>>;

    /// Insert a new review.
    async fn insert(&self, review: &NewReview) -> Result<()>;
}

/// Read/write access to the portfolio images table.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Fetch a provider's portfolio images, optionally capped.
    async fn list_for_provider(
        &self,
        provider_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<PortfolioImage>>;

    /// Replace a provider's portfolio wholesale (delete-all-then-insert).
    async fn replace_for_provider(&self, provider_id: &str, image_urls: &[String]) -> Result<()>;
}

/// Object storage for profile and portfolio images.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload an image and return its stable public URL.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        upload: &ImageUpload,
        overwrite: bool,
    ) -> Result<String>;
}
