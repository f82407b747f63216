//! Providers table adapter

use async_trait::async_trait;
use craftlink_core::ProviderStore;
use craftlink_domain::{Provider, Result};

use crate::hosted::TableApi;

const TABLE: &str = "providers";

/// [`ProviderStore`] backed by the hosted `providers` table.
#[derive(Clone)]
pub struct ProviderTable {
    tables: TableApi,
}

impl ProviderTable {
    pub fn new(tables: TableApi) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl ProviderStore for ProviderTable {
    async fn list_all(&self) -> Result<Vec<Provider>> {
        self.tables.from(TABLE).fetch().await
    }

    async fn find_by_user(&self, user_id: &str) -> Result<Option<Provider>> {
        self.tables.from(TABLE).eq("user_id", user_id).fetch_single().await
    }

    async fn insert(&self, provider: &Provider) -> Result<()> {
        self.tables.insert(TABLE, provider).await
    }

    async fn update(&self, provider: &Provider) -> Result<()> {
        self.tables.update(TABLE, "user_id", &provider.user_id, provider).await
    }
}
