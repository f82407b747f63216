//! Directory loader - denormalized provider list with review aggregates

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use craftlink_domain::utils::rating;
use craftlink_domain::{DirectoryEntry, DirectorySnapshot, Result, FALLBACK_DISPLAY_NAME};
use tracing::{debug, info};

use crate::store_ports::{ProviderStore, ReviewStore, UserStore};

/// Loads and caches the provider directory.
///
/// Each [`reload`](Self::reload) builds a fresh immutable snapshot from
/// the providers, users and reviews tables; the latest snapshot is kept
/// for synchronous access by the filter/render path. Last load wins.
pub struct DirectoryService {
    providers: Arc<dyn ProviderStore>,
    users: Arc<dyn UserStore>,
    reviews: Arc<dyn ReviewStore>,
    snapshot: RwLock<Option<Arc<DirectorySnapshot>>>,
}

impl DirectoryService {
    /// Create a new directory service with no snapshot loaded.
    pub fn new(
        providers: Arc<dyn ProviderStore>,
        users: Arc<dyn UserStore>,
        reviews: Arc<dyn ReviewStore>,
    ) -> Self {
        Self { providers, users, reviews, snapshot: RwLock::new(None) }
    }

    /// The most recently loaded snapshot, if any. No I/O.
    pub fn current(&self) -> Option<Arc<DirectorySnapshot>> {
        // The guarded value is a plain pointer swap, so a panic elsewhere
        // cannot leave it half-written; recover rather than lose the
        // snapshot.
        self.snapshot.read().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    /// Fetch everything and build a new snapshot.
    ///
    /// An empty providers table is a valid empty snapshot, not an error.
    /// Any fetch failure aborts the whole reload; the previous snapshot
    /// stays in place and partial results are never published.
    pub async fn reload(&self) -> Result<Arc<DirectorySnapshot>> {
        let providers = self.providers.list_all().await?;
        if providers.is_empty() {
            debug!("no providers found");
            return Ok(self.publish(DirectorySnapshot::empty(Utc::now())));
        }

        let user_ids: Vec<String> = providers.iter().map(|p| p.user_id.clone()).collect();
        let users = self.users.get_many(&user_ids).await?;
        let names: HashMap<&str, &str> =
            users.iter().map(|u| (u.id.as_str(), u.name.as_str())).collect();

        // Whole-table fetch; aggregates are recomputed from scratch on
        // every load rather than maintained incrementally.
        let reviews = self.reviews.list_all().await?;
        let mut ratings: HashMap<&str, Vec<u8>> = HashMap::new();
        for review in &reviews {
            ratings.entry(review.provider_id.as_str()).or_default().push(review.rating);
        }

        let entries: Vec<DirectoryEntry> = providers
            .into_iter()
            .map(|provider| {
                let display_name = names
                    .get(provider.user_id.as_str())
                    .map_or(FALLBACK_DISPLAY_NAME, |name| *name)
                    .to_string();
                let (avg_rating, review_count) = rating::summarize(
                    ratings.get(provider.user_id.as_str()).map_or(&[][..], Vec::as_slice),
                );
                DirectoryEntry { provider, display_name, avg_rating, review_count }
            })
            .collect();

        info!(providers = entries.len(), reviews = reviews.len(), "directory reloaded");
        Ok(self.publish(DirectorySnapshot { entries, loaded_at: Utc::now() }))
    }

    fn publish(&self, snapshot: DirectorySnapshot) -> Arc<DirectorySnapshot> {
        let snapshot = Arc::new(snapshot);
        let mut guard =
            self.snapshot.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(Arc::clone(&snapshot));
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use craftlink_domain::{CraftlinkError, NewReview, Provider, Review, Role, User};

    use super::*;

    fn provider(user_id: &str) -> Provider {
        Provider {
            user_id: user_id.to_string(),
            bio: String::new(),
            skills: String::new(),
            price_range: String::new(),
            location: String::new(),
            availability: String::new(),
            contact_link: String::new(),
            profile_img_url: None,
        }
    }

    fn review(provider_id: &str, client_id: &str, rating: u8) -> Review {
        Review {
            provider_id: provider_id.to_string(),
            client_id: client_id.to_string(),
            rating,
            comment: String::new(),
            created_at: Utc::now(),
        }
    }

    struct StubProviders {
        providers: Result<Vec<Provider>>,
    }

    #[async_trait]
    impl ProviderStore for StubProviders {
        async fn list_all(&self) -> Result<Vec<Provider>> {
            self.providers.clone()
        }

        async fn find_by_user(&self, user_id: &str) -> Result<Option<Provider>> {
            Ok(self
                .providers
                .clone()?
                .into_iter()
                .find(|p| p.user_id == user_id))
        }

        async fn insert(&self, _provider: &Provider) -> Result<()> {
            Ok(())
        }

        async fn update(&self, _provider: &Provider) -> Result<()> {
            Ok(())
        }
    }

    struct StubUsers {
        users: Vec<User>,
    }

    #[async_trait]
    impl UserStore for StubUsers {
        async fn get(&self, id: &str) -> Result<Option<User>> {
            Ok(self.users.iter().find(|u| u.id == id).cloned())
        }

        async fn get_many(&self, ids: &[String]) -> Result<Vec<User>> {
            Ok(self.users.iter().filter(|u| ids.contains(&u.id)).cloned().collect())
        }

        async fn insert(&self, _user: &User) -> Result<()> {
            Ok(())
        }

        async fn role_of(&self, id: &str) -> Result<Option<Role>> {
            Ok(self.users.iter().find(|u| u.id == id).map(|u| u.role))
        }
    }

    struct StubReviews {
        reviews: Result<Vec<Review>>,
    }

    #[async_trait]
    impl ReviewStore for StubReviews {
        async fn list_all(&self) -> Result<Vec<Review>> {
            self.reviews.clone()
        }

        async fn list_for_provider(&self, provider_id: &str) -> Result<Vec<Review>> {
            Ok(self
                .reviews
                .clone()?
                .into_iter()
                .filter(|r| r.provider_id == provider_id)
                .collect())
        }

        async fn insert(&self, _review: &NewReview) -> Result<()> {
            Ok(())
        }
    }

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            role: Role::Provider,
        }
    }

    fn service(
        providers: Result<Vec<Provider>>,
        users: Vec<User>,
        reviews: Result<Vec<Review>>,
    ) -> DirectoryService {
        DirectoryService::new(
            Arc::new(StubProviders { providers }),
            Arc::new(StubUsers { users }),
            Arc::new(StubReviews { reviews }),
        )
    }

    #[tokio::test]
    async fn joins_users_and_aggregates_reviews_in_provider_order() {
        let service = service(
            Ok(vec![provider("p1"), provider("p2")]),
            vec![user("p1", "Alice"), user("p2", "Bob")],
            Ok(vec![
                review("p1", "c1", 5),
                review("p1", "c2", 4),
                review("p1", "c3", 3),
            ]),
        );

        let snapshot = service.reload().await.expect("reload should succeed");
        assert_eq!(snapshot.entries.len(), 2);

        let first = &snapshot.entries[0];
        assert_eq!(first.display_name, "Alice");
        assert_eq!(first.avg_rating, 4.0);
        assert_eq!(first.review_count, 3);

        let second = &snapshot.entries[1];
        assert_eq!(second.display_name, "Bob");
        assert_eq!(second.avg_rating, 0.0);
        assert_eq!(second.review_count, 0);
    }

    #[tokio::test]
    async fn missing_user_row_gets_fallback_display_name() {
        let service = service(Ok(vec![provider("p1")]), vec![], Ok(vec![]));

        let snapshot = service.reload().await.expect("reload should succeed");
        assert_eq!(snapshot.entries[0].display_name, FALLBACK_DISPLAY_NAME);
    }

    #[tokio::test]
    async fn empty_provider_table_is_an_empty_snapshot() {
        let service = service(Ok(vec![]), vec![], Ok(vec![]));

        let snapshot = service.reload().await.expect("reload should succeed");
        assert!(snapshot.is_empty());
        assert!(service.current().expect("snapshot cached").is_empty());
    }

    #[tokio::test]
    async fn fetch_failure_aborts_and_keeps_previous_snapshot() {
        let good = service(
            Ok(vec![provider("p1")]),
            vec![user("p1", "Alice")],
            Ok(vec![review("p1", "c1", 5)]),
        );
        let first = good.reload().await.expect("first reload");

        // Swap in a failing review store by building a new service that
        // shares nothing; what matters is that a failed reload leaves
        // `current()` untouched.
        let failing = DirectoryService::new(
            Arc::new(StubProviders { providers: Ok(vec![provider("p1")]) }),
            Arc::new(StubUsers { users: vec![] }),
            Arc::new(StubReviews { reviews: Err(CraftlinkError::Network("down".into())) }),
        );
        assert!(failing.reload().await.is_err());
        assert!(failing.current().is_none());

        assert_eq!(good.current().expect("snapshot kept").entries.len(), first.entries.len());
    }

    #[tokio::test]
    async fn current_is_none_before_first_load() {
        let service = service(Ok(vec![]), vec![], Ok(vec![]));
        assert!(service.current().is_none());
    }

    #[tokio::test]
    async fn poisoned_lock_loses_neither_reads_nor_writes() {
        let service = service(
            Ok(vec![provider("p1")]),
            vec![user("p1", "Alice")],
            Ok(vec![review("p1", "c1", 5)]),
        );
        service.reload().await.expect("first reload");

        let poison = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = service.snapshot.write().expect("lock not yet poisoned");
            panic!("poison the snapshot lock");
        }));
        assert!(poison.is_err());

        // Reads keep returning the published snapshot and a later reload
        // still replaces it.
        assert_eq!(service.current().expect("snapshot survives").entries.len(), 1);
        let reloaded = service.reload().await.expect("reload after poison");
        assert_eq!(service.current().expect("snapshot replaced").loaded_at, reloaded.loaded_at);
    }
}
