//! Reviews table adapter
//!
//! The table carries a unique key on (provider_id, client_id); inserting
//! a second review for the same pair surfaces as a `Duplicate` error
//! from the table API.

use async_trait::async_trait;
use craftlink_core::ReviewStore;
use craftlink_domain::{NewReview, Result, Review};

use crate::hosted::TableApi;

const TABLE: &str = "reviews";

/// [`ReviewStore`] backed by the hosted `reviews` table.
#[derive(Clone)]
pub struct ReviewTable {
    tables: TableApi,
}

impl ReviewTable {
    pub fn new(tables: TableApi) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl ReviewStore for ReviewTable {
    async fn list_all(&self) -> Result<Vec<Review>> {
        self.tables.from(TABLE).fetch().await
    }

    async fn list_for_provider(&self, provider_id: &str) -> Result<Vec<Review>> {
        self.tables
            .from(TABLE)
            .eq("provider_id", provider_id)
            .order("created_at", true)
            .fetch()
            .await
    }

    async fn insert(&self, review: &NewReview) -> Result<()> {
        self.tables.insert(TABLE, review).await
    }
}
