//! Shared wiring for the hosted backend surfaces

use std::sync::RwLock;
use std::time::Duration;

use craftlink_domain::{CraftlinkError, Result};
use reqwest::header::{HeaderMap, HeaderValue};
use url::Url;

use crate::config::HostedConfig;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Shared base URL, api key and session state for the hosted backend.
///
/// Every request carries the project api key; authenticated requests
/// additionally carry the session's bearer token. The session token is
/// written by the auth API on sign-in/sign-out and read by the table and
/// storage APIs.
pub struct HostedClient {
    base_url: String,
    api_key: String,
    http: HttpClient,
    session_token: RwLock<Option<String>>,
}

impl HostedClient {
    /// Create a client from configuration.
    ///
    /// Fails fast with a `Config` error when the base URL does not parse;
    /// a misconfigured client would otherwise fail on every call with a
    /// confusing network error.
    pub fn new(config: &HostedConfig) -> Result<Self> {
        let parsed = Url::parse(&config.base_url).map_err(|err| {
            let infra: InfraError = err.into();
            CraftlinkError::from(infra)
        })?;

        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(&config.api_key).map_err(|_| {
            CraftlinkError::Config("api key contains invalid header characters".into())
        })?;
        headers.insert("apikey", key_value);

        let http = HttpClient::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            http,
            session_token: RwLock::new(None),
        })
    }

    /// Absolute URL for a path under the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// The underlying HTTP client.
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Bearer token for the current request: the session token when
    /// signed in, the anon api key otherwise.
    pub fn bearer_token(&self) -> String {
        self.session_token
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_else(|| self.api_key.clone())
    }

    /// Install or clear the session token after sign-in/sign-out.
    pub fn set_session_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.session_token.write() {
            *guard = token;
        }
    }

    /// Whether a session token is currently installed.
    pub fn has_session(&self) -> bool {
        self.session_token.read().is_ok_and(|guard| guard.is_some())
    }
}
