//! Users table adapter

use async_trait::async_trait;
use craftlink_core::UserStore;
use craftlink_domain::{Result, Role, User};

use crate::hosted::TableApi;

const TABLE: &str = "users";

/// [`UserStore`] backed by the hosted `users` table.
#[derive(Clone)]
pub struct UserTable {
    tables: TableApi,
}

impl UserTable {
    pub fn new(tables: TableApi) -> Self {
        Self { tables }
    }
}

#[async_trait]
impl UserStore for UserTable {
    async fn get(&self, id: &str) -> Result<Option<User>> {
        self.tables.from(TABLE).eq("id", id).fetch_single().await
    }

    async fn get_many(&self, ids: &[String]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.tables.from(TABLE).in_("id", ids).fetch().await
    }

    async fn insert(&self, user: &User) -> Result<()> {
        self.tables.insert(TABLE, user).await
    }

    async fn role_of(&self, id: &str) -> Result<Option<Role>> {
        let row: Option<RoleRow> =
            self.tables.from(TABLE).select("role").eq("id", id).fetch_single().await?;
        Ok(row.map(|r| Role::parse_lenient(&r.role)))
    }
}

#[derive(serde::Deserialize)]
struct RoleRow {
    role: String,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::HostedConfig;
    use crate::hosted::HostedClient;

    fn store(server: &MockServer) -> UserTable {
        let config = HostedConfig {
            base_url: server.uri(),
            api_key: "anon-key".to_string(),
            timeout_seconds: 5,
        };
        let client = Arc::new(HostedClient::new(&config).expect("hosted client"));
        UserTable::new(TableApi::new(client))
    }

    #[tokio::test]
    async fn get_many_skips_the_request_for_no_ids() {
        let server = MockServer::start().await;
        // No mock mounted: any request would 404 and fail the fetch.
        let users = store(&server).get_many(&[]).await.expect("empty lookup");
        assert!(users.is_empty());
    }

    #[tokio::test]
    async fn role_of_parses_unknown_roles_leniently() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/users"))
            .and(query_param("select", "role"))
            .and(query_param("id", "eq.u1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"role": "admin"})))
            .mount(&server)
            .await;

        let role = store(&server).role_of("u1").await.expect("role lookup");
        assert_eq!(role, Some(Role::Client));
    }
}
