//! Hosted table store client
//!
//! PostgREST-style access to the relational tables: equality and
//! set-membership filters, ordering, limits and a single-row mode.
//! Error payloads carry a machine-readable `code`; the conversions in
//! [`crate::errors`] turn those into domain errors.

use std::sync::Arc;

use craftlink_domain::{CraftlinkError, Result};
use reqwest::header::ACCEPT;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::HostedClient;
use crate::errors::table_error;

/// Content type asking the store for exactly one row.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Client for the hosted table surface (`/rest/v1`).
#[derive(Clone)]
pub struct TableApi {
    client: Arc<HostedClient>,
}

impl TableApi {
    /// Create a new table API over a shared hosted client.
    pub fn new(client: Arc<HostedClient>) -> Self {
        Self { client }
    }

    /// Start a read query against `table`.
    pub fn from(&self, table: &str) -> SelectBuilder {
        SelectBuilder {
            api: self.clone(),
            table: table.to_string(),
            params: vec![("select".to_string(), "*".to_string())],
        }
    }

    /// Insert one or more rows.
    pub async fn insert<T: Serialize + ?Sized>(&self, table: &str, rows: &T) -> Result<()> {
        let builder = self
            .client
            .http()
            .request(Method::POST, self.client.endpoint(&format!("/rest/v1/{table}")))
            .bearer_auth(self.client.bearer_token())
            .header("Prefer", "return=minimal")
            .json(rows);

        let response = self.client.http().send(builder).await?;
        check_write_response(response).await
    }

    /// Update rows matching `column = value`.
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        table: &str,
        column: &str,
        value: &str,
        patch: &T,
    ) -> Result<()> {
        let builder = self
            .client
            .http()
            .request(Method::PATCH, self.client.endpoint(&format!("/rest/v1/{table}")))
            .query(&[(column, format!("eq.{value}"))])
            .bearer_auth(self.client.bearer_token())
            .header("Prefer", "return=minimal")
            .json(patch);

        let response = self.client.http().send(builder).await?;
        check_write_response(response).await
    }

    /// Delete rows matching `column = value`.
    pub async fn delete(&self, table: &str, column: &str, value: &str) -> Result<()> {
        let builder = self
            .client
            .http()
            .request(Method::DELETE, self.client.endpoint(&format!("/rest/v1/{table}")))
            .query(&[(column, format!("eq.{value}"))])
            .bearer_auth(self.client.bearer_token());

        let response = self.client.http().send(builder).await?;
        check_write_response(response).await
    }
}

/// Builder for table reads.
pub struct SelectBuilder {
    api: TableApi,
    table: String,
    params: Vec<(String, String)>,
}

impl SelectBuilder {
    /// Restrict the selected columns (defaults to `*`).
    pub fn select(mut self, columns: &str) -> Self {
        if let Some(entry) = self.params.iter_mut().find(|(key, _)| key == "select") {
            entry.1 = columns.to_string();
        }
        self
    }

    /// Equality filter.
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// Set-membership filter.
    pub fn in_(mut self, column: &str, values: &[String]) -> Self {
        let list = values
            .iter()
            .map(|v| format!("\"{v}\""))
            .collect::<Vec<_>>()
            .join(",");
        self.params.push((column.to_string(), format!("in.({list})")));
        self
    }

    /// Sort on a column.
    pub fn order(mut self, column: &str, descending: bool) -> Self {
        let direction = if descending { "desc" } else { "asc" };
        self.params.push(("order".to_string(), format!("{column}.{direction}")));
        self
    }

    /// Cap the number of returned rows.
    pub fn limit(mut self, count: usize) -> Self {
        self.params.push(("limit".to_string(), count.to_string()));
        self
    }

    /// Fetch all matching rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let response = self.send(None).await?;
        let status = response.status();

        if !status.is_success() {
            return Err(read_error(response).await);
        }

        response.json::<Vec<T>>().await.map_err(|err| {
            CraftlinkError::Internal(format!("failed to parse table response: {err}"))
        })
    }

    /// Fetch exactly one row, or `None` when it does not exist.
    pub async fn fetch_single<T: DeserializeOwned>(self) -> Result<Option<T>> {
        let response = self.send(Some(SINGLE_OBJECT)).await?;
        let status = response.status();

        if !status.is_success() {
            return match read_error(response).await {
                // Single-row expectation missed; absence is not an error
                // at this layer.
                CraftlinkError::NotFound(_) => Ok(None),
                other => Err(other),
            };
        }

        let row = response.json::<T>().await.map_err(|err| {
            CraftlinkError::Internal(format!("failed to parse table row: {err}"))
        })?;
        Ok(Some(row))
    }

    async fn send(self, accept: Option<&str>) -> Result<reqwest::Response> {
        let url = self.api.client.endpoint(&format!("/rest/v1/{}", self.table));
        debug!(table = %self.table, params = self.params.len(), "table query");

        let mut builder = self
            .api
            .client
            .http()
            .request(Method::GET, url)
            .query(&self.params)
            .bearer_auth(self.api.client.bearer_token());
        if let Some(accept) = accept {
            builder = builder.header(ACCEPT, accept);
        }

        self.api.client.http().send(builder).await
    }
}

async fn check_write_response(response: reqwest::Response) -> Result<()> {
    if response.status().is_success() {
        Ok(())
    } else {
        Err(read_error(response).await)
    }
}

async fn read_error(response: reqwest::Response) -> CraftlinkError {
    let status = response.status();
    match response.json::<TableErrorBody>().await {
        Ok(body) => table_error(status, body.code.as_deref(), &body.message),
        Err(_) => table_error(status, None, "unreadable error body"),
    }
}

#[derive(Debug, Deserialize)]
struct TableErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: String,
}
