//! Portfolio images table adapter

use async_trait::async_trait;
use craftlink_core::PortfolioStore;
use craftlink_domain::{PortfolioImage, Result};
use tracing::debug;

use crate::hosted::TableApi;

const TABLE: &str = "portfolio_images";

/// [`PortfolioStore`] backed by the hosted `portfolio_images` table.
#[derive(Clone)]
pub struct PortfolioTable {
    tables: TableApi,
}

impl PortfolioTable {
    pub fn new(tables: TableApi) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl PortfolioStore for PortfolioTable {
    async fn list_for_provider(
        &self,
        provider_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<PortfolioImage>> {
        let mut query = self.tables.from(TABLE).eq("provider_id", provider_id);
        if let Some(limit) = limit {
            query = query.limit(limit);
        }
        query.fetch().await
    }

    async fn replace_for_provider(&self, provider_id: &str, image_urls: &[String]) -> Result<()> {
        debug!(provider_id, count = image_urls.len(), "replacing portfolio rows");

        self.tables.delete(TABLE, "provider_id", provider_id).await?;

        if image_urls.is_empty() {
            return Ok(());
        }

        let rows: Vec<PortfolioImage> = image_urls
            .iter()
            .map(|url| PortfolioImage {
                provider_id: provider_id.to_string(),
                image_url: url.clone(),
            })
            .collect();
        self.tables.insert(TABLE, &rows).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::HostedConfig;
    use crate::hosted::HostedClient;

    fn store(server: &MockServer) -> PortfolioTable {
        let config = HostedConfig {
            base_url: server.uri(),
            api_key: "anon-key".to_string(),
            timeout_seconds: 5,
        };
        let client = Arc::new(HostedClient::new(&config).expect("hosted client"));
        PortfolioTable::new(TableApi::new(client))
    }

    #[tokio::test]
    async fn list_applies_the_optional_cap() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/portfolio_images"))
            .and(query_param("provider_id", "eq.p1"))
            .and(query_param("limit", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"provider_id": "p1", "image_url": "https://cdn.example.com/a.jpg"}
            ])))
            .mount(&server)
            .await;

        let images = store(&server).list_for_provider("p1", Some(3)).await.expect("fetch");
        assert_eq!(images.len(), 1);
    }

    #[tokio::test]
    async fn replace_deletes_then_inserts_new_rows() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/portfolio_images"))
            .and(query_param("provider_id", "eq.p1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/portfolio_images"))
            .and(body_json(json!([
                {"provider_id": "p1", "image_url": "https://cdn.example.com/a.jpg"},
                {"provider_id": "p1", "image_url": "https://cdn.example.com/b.jpg"},
            ])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        store(&server)
            .replace_for_provider(
                "p1",
                &[
                    "https://cdn.example.com/a.jpg".to_string(),
                    "https://cdn.example.com/b.jpg".to_string(),
                ],
            )
            .await
            .expect("replace");
    }

    #[tokio::test]
    async fn replacing_with_nothing_only_deletes() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/portfolio_images"))
            .and(query_param("provider_id", "eq.p1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        store(&server).replace_for_provider("p1", &[]).await.expect("replace");
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }
}
