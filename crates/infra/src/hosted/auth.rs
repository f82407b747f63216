//! Hosted auth service client

use std::sync::Arc;

use async_trait::async_trait;
use craftlink_core::{AuthGateway, AuthUser, NewAccount, Session};
use craftlink_domain::{CraftlinkError, Result};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::client::HostedClient;
use crate::errors::auth_error;

/// Client for the hosted auth surface (`/auth/v1`).
pub struct AuthApi {
    client: Arc<HostedClient>,
}

impl AuthApi {
    /// Create a new auth API over a shared hosted client.
    pub fn new(client: Arc<HostedClient>) -> Self {
        Self { client }
    }

    async fn request_session(&self, path: &str, body: &impl Serialize) -> Result<SessionPayload> {
        let builder = self
            .client
            .http()
            .request(Method::POST, self.client.endpoint(path))
            .bearer_auth(self.client.bearer_token())
            .json(body);

        let response = self.client.http().send(builder).await?;
        let status = response.status();

        if !status.is_success() {
            let message = error_message(response).await;
            return Err(auth_error(status, &message));
        }

        response.json::<SessionPayload>().await.map_err(|err| {
            CraftlinkError::Internal(format!("failed to parse auth response: {err}"))
        })
    }
}

#[async_trait]
impl AuthGateway for AuthApi {
    async fn sign_up(&self, account: &NewAccount) -> Result<Session> {
        let body = SignUpRequest {
            email: account.email.clone(),
            password: account.password.clone(),
            data: SignUpMetadata {
                name: account.name.clone(),
                role: account.role.as_str().to_string(),
            },
        };

        let payload = self.request_session("/auth/v1/signup", &body).await?;

        // Deployments with email confirmation enabled return the user
        // without a token; signing in immediately mirrors the flow where
        // confirmation is disabled.
        let payload = if payload.access_token.is_some() {
            payload
        } else {
            debug!("signup returned no session, attempting immediate sign-in");
            let body =
                PasswordGrant { email: account.email.clone(), password: account.password.clone() };
            self.request_session("/auth/v1/token?grant_type=password", &body).await?
        };

        let session = payload.into_session()?;
        self.client.set_session_token(Some(session.access_token.clone()));
        info!(user_id = %session.user.id, "account created");
        Ok(session)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let body = PasswordGrant { email: email.to_string(), password: password.to_string() };
        let payload = self.request_session("/auth/v1/token?grant_type=password", &body).await?;

        let session = payload.into_session()?;
        self.client.set_session_token(Some(session.access_token.clone()));
        debug!(user_id = %session.user.id, "signed in");
        Ok(session)
    }

    async fn sign_out(&self) -> Result<()> {
        if !self.client.has_session() {
            return Ok(());
        }

        let builder = self
            .client
            .http()
            .request(Method::POST, self.client.endpoint("/auth/v1/logout"))
            .bearer_auth(self.client.bearer_token());

        let response = self.client.http().send(builder).await?;
        // The local session is gone either way; a failed revoke only
        // means the token lives until it expires.
        self.client.set_session_token(None);

        let status = response.status();
        if !status.is_success() && status != reqwest::StatusCode::UNAUTHORIZED {
            let message = error_message(response).await;
            return Err(auth_error(status, &message));
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<Option<AuthUser>> {
        if !self.client.has_session() {
            return Ok(None);
        }

        let builder = self
            .client
            .http()
            .request(Method::GET, self.client.endpoint("/auth/v1/user"))
            .bearer_auth(self.client.bearer_token());

        let response = self.client.http().send(builder).await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            // Expired or revoked token; treat as signed out.
            self.client.set_session_token(None);
            return Ok(None);
        }
        if !status.is_success() {
            let message = error_message(response).await;
            return Err(auth_error(status, &message));
        }

        let user: WireUser = response.json().await.map_err(|err| {
            CraftlinkError::Internal(format!("failed to parse auth user: {err}"))
        })?;
        Ok(Some(user.into_auth_user()))
    }
}

async fn error_message(response: reqwest::Response) -> String {
    match response.json::<AuthErrorBody>().await {
        Ok(body) => body.message(),
        Err(_) => "unknown auth error".to_string(),
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct SignUpRequest {
    email: String,
    password: String,
    data: SignUpMetadata,
}

#[derive(Debug, Serialize)]
struct SignUpMetadata {
    name: String,
    role: String,
}

#[derive(Debug, Serialize)]
struct PasswordGrant {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct SessionPayload {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    user: Option<WireUser>,
}

impl SessionPayload {
    fn into_session(self) -> Result<Session> {
        let access_token = self.access_token.ok_or_else(|| {
            CraftlinkError::Auth("auth service returned no access token".into())
        })?;
        let user = self
            .user
            .ok_or_else(|| CraftlinkError::Internal("auth response missing user".into()))?;
        Ok(Session { user: user.into_auth_user(), access_token })
    }
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    user_metadata: WireMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct WireMetadata {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

impl WireUser {
    fn into_auth_user(self) -> AuthUser {
        AuthUser {
            id: self.id,
            email: self.email,
            metadata_name: self.user_metadata.name,
            metadata_role: self.user_metadata.role,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}

impl AuthErrorBody {
    fn message(self) -> String {
        self.error_description
            .or(self.msg)
            .unwrap_or_else(|| "unknown auth error".to_string())
    }
}
