//! Retrying HTTP client for the hosted backend
//!
//! Thin wrapper over reqwest adding a timeout, bounded retries with
//! exponential backoff, and per-request correlation ids in the logs.
//! Only idempotent requests (GET/HEAD) are retried; table inserts and
//! uploads must not be replayed on an ambiguous failure.

use std::time::Duration;

use craftlink_domain::{CraftlinkError, Result};
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;
use uuid::Uuid;

use crate::errors::InfraError;

/// HTTP client with built-in retry and timeout support.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    max_attempts: usize,
    base_backoff: Duration,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder.
    ///
    /// GET and HEAD requests are retried on 5xx responses and on
    /// connect/timeout failures; everything else gets a single attempt.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let correlation_id = Uuid::new_v4();
        let mut attempts_left = self.max_attempts.max(1);
        let mut attempt = 0usize;

        loop {
            attempt += 1;
            let cloned_builder = builder.try_clone().ok_or_else(|| {
                CraftlinkError::Internal(
                    "request body cannot be cloned; buffer the body before sending".into(),
                )
            })?;

            let request = cloned_builder.build().map_err(|err| {
                let infra: InfraError = err.into();
                CraftlinkError::from(infra)
            })?;

            let method = request.method().clone();
            let url = request.url().clone();
            let retryable = matches!(method, Method::GET | Method::HEAD);
            if !retryable {
                attempts_left = attempts_left.min(1);
            }
            debug!(%correlation_id, attempt, %method, %url, "sending request");

            match self.client.execute(request).await {
                Ok(response) => {
                    let status = response.status();
                    debug!(%correlation_id, attempt, %status, "received response");

                    if status.is_server_error() && attempts_left > 1 {
                        attempts_left -= 1;
                        self.sleep_with_backoff(attempt).await;
                        continue;
                    }

                    return Ok(response);
                }
                Err(err) => {
                    debug!(%correlation_id, attempt, error = %err, "request failed");

                    if attempts_left > 1 && is_transient(&err) {
                        attempts_left -= 1;
                        self.sleep_with_backoff(attempt).await;
                        continue;
                    }

                    let infra: InfraError = err.into();
                    return Err(CraftlinkError::from(infra));
                }
            }
        }
    }

    async fn sleep_with_backoff(&self, retry_number: usize) {
        // Doubles per retry, capped at 2^8 times the base.
        let shift = retry_number.saturating_sub(1).min(8) as u32;
        let delay = self.base_backoff.saturating_mul(1 << shift);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

// Only timeouts and connect failures are worth another attempt; other
// request errors (bad bodies, redirect loops) fail the same way every
// time.
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect()
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    max_attempts: usize,
    base_backoff: Duration,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_attempts: 3,
            base_backoff: Duration::from_millis(200),
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    /// Per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configure the total number of attempts (initial try + retries).
    pub fn max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    /// Base delay for the exponential backoff between retries.
    pub fn base_backoff(mut self, backoff: Duration) -> Self {
        self.base_backoff = backoff;
        self
    }

    /// Headers attached to every request (api key, content negotiation).
    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout);

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder.build().map_err(|err| {
            let infra: InfraError = err.into();
            CraftlinkError::from(infra)
        })?;

        Ok(HttpClient {
            client,
            max_attempts: self.max_attempts.max(1),
            base_backoff: self.base_backoff,
        })
    }
}
