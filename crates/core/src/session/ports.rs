//! Port interface for the hosted authentication service

use async_trait::async_trait;
use craftlink_domain::{Result, Role};
use serde::{Deserialize, Serialize};

/// The authenticated identity as reported by the auth service.
///
/// Metadata fields are whatever was attached at signup; the users table
/// remains the source of truth when they are absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub metadata_name: Option<String>,
    pub metadata_role: Option<String>,
}

/// Signup input.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// An authenticated session.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: AuthUser,
    pub access_token: String,
}

/// Trait wrapping the hosted auth service.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Create an account, attaching name and role as auth metadata.
    async fn sign_up(&self, account: &NewAccount) -> Result<Session>;

    /// Password sign-in.
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session>;

    /// End the current session.
    async fn sign_out(&self) -> Result<()>;

    /// The currently signed-in user, or `None` when unauthenticated.
    async fn current_user(&self) -> Result<Option<AuthUser>>;
}
