//! Session accessor - current user and role resolution

use std::sync::Arc;

use craftlink_domain::{CraftlinkError, Result, Role, User};
use tracing::{debug, warn};

use super::ports::{AuthGateway, AuthUser, NewAccount, Session};
use crate::store_ports::UserStore;

/// Wraps the hosted auth service and the users table.
pub struct SessionService {
    auth: Arc<dyn AuthGateway>,
    users: Arc<dyn UserStore>,
}

impl SessionService {
    /// Create a new session service.
    pub fn new(auth: Arc<dyn AuthGateway>, users: Arc<dyn UserStore>) -> Self {
        Self { auth, users }
    }

    /// The currently signed-in user, or `None`.
    pub async fn current_user(&self) -> Result<Option<AuthUser>> {
        self.auth.current_user().await
    }

    /// Resolve a user's role.
    ///
    /// Prefers the role attached as auth metadata, then falls back to the
    /// users table. A failed or empty lookup degrades to `Role::Client`
    /// so a missing row never locks someone out of browsing.
    pub async fn role_of(&self, user: &AuthUser) -> Role {
        if let Some(raw) = &user.metadata_role {
            return Role::parse_lenient(raw);
        }

        match self.users.role_of(&user.id).await {
            Ok(Some(role)) => role,
            Ok(None) => {
                debug!(user_id = %user.id, "no users row for role lookup, assuming client");
                Role::Client
            }
            Err(err) => {
                warn!(user_id = %user.id, error = %err, "role lookup failed, assuming client");
                Role::Client
            }
        }
    }

    /// Create an account and its users-table row.
    ///
    /// The hosted backend may create the row itself via a trigger, so a
    /// duplicate insert is tolerated rather than failing the signup.
    pub async fn sign_up(&self, account: &NewAccount) -> Result<Session> {
        let session = self.auth.sign_up(account).await?;

        let user = User {
            id: session.user.id.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            role: account.role,
        };

        match self.users.insert(&user).await {
            Ok(()) => {}
            Err(CraftlinkError::Duplicate(_)) => {
                debug!(user_id = %user.id, "users row already created by backend trigger");
            }
            Err(err) => return Err(err),
        }

        Ok(session)
    }

    /// Password sign-in.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        self.auth.sign_in(email, password).await
    }

    /// End the current session.
    pub async fn sign_out(&self) -> Result<()> {
        self.auth.sign_out().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    struct StubGateway {
        user: Option<AuthUser>,
    }

    #[async_trait]
    impl AuthGateway for StubGateway {
        async fn sign_up(&self, account: &NewAccount) -> Result<Session> {
            Ok(Session {
                user: AuthUser {
                    id: "new-user".to_string(),
                    email: account.email.clone(),
                    metadata_name: Some(account.name.clone()),
                    metadata_role: Some(account.role.as_str().to_string()),
                },
                access_token: "token".to_string(),
            })
        }

        async fn sign_in(&self, email: &str, _password: &str) -> Result<Session> {
            Ok(Session {
                user: AuthUser {
                    id: "signed-in".to_string(),
                    email: email.to_string(),
                    metadata_name: None,
                    metadata_role: None,
                },
                access_token: "token".to_string(),
            })
        }

        async fn sign_out(&self) -> Result<()> {
            Ok(())
        }

        async fn current_user(&self) -> Result<Option<AuthUser>> {
            Ok(self.user.clone())
        }
    }

    struct StubUserStore {
        role: Result<Option<Role>>,
        insert_error: Mutex<Option<CraftlinkError>>,
        inserts: AtomicUsize,
    }

    impl StubUserStore {
        fn with_role(role: Result<Option<Role>>) -> Self {
            Self { role, insert_error: Mutex::new(None), inserts: AtomicUsize::new(0) }
        }
    }

    #[async_trait]
    impl UserStore for StubUserStore {
        async fn get(&self, _id: &str) -> Result<Option<User>> {
            Ok(None)
        }

        async fn get_many(&self, _ids: &[String]) -> Result<Vec<User>> {
            Ok(vec![])
        }

        async fn insert(&self, _user: &User) -> Result<()> {
            self.inserts.fetch_add(1, Ordering::SeqCst);
            match self.insert_error.lock().unwrap().take() {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        async fn role_of(&self, _id: &str) -> Result<Option<Role>> {
            self.role.clone()
        }
    }

    fn auth_user(metadata_role: Option<&str>) -> AuthUser {
        AuthUser {
            id: "u1".to_string(),
            email: "u1@example.com".to_string(),
            metadata_name: None,
            metadata_role: metadata_role.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn role_prefers_auth_metadata() {
        let service = SessionService::new(
            Arc::new(StubGateway { user: None }),
            Arc::new(StubUserStore::with_role(Ok(Some(Role::Client)))),
        );

        let role = service.role_of(&auth_user(Some("provider"))).await;
        assert_eq!(role, Role::Provider);
    }

    #[tokio::test]
    async fn role_falls_back_to_users_table() {
        let service = SessionService::new(
            Arc::new(StubGateway { user: None }),
            Arc::new(StubUserStore::with_role(Ok(Some(Role::Provider)))),
        );

        let role = service.role_of(&auth_user(None)).await;
        assert_eq!(role, Role::Provider);
    }

    #[tokio::test]
    async fn role_defaults_to_client_on_lookup_failure() {
        let service = SessionService::new(
            Arc::new(StubGateway { user: None }),
            Arc::new(StubUserStore::with_role(Err(CraftlinkError::Network("down".into())))),
        );

        let role = service.role_of(&auth_user(None)).await;
        assert_eq!(role, Role::Client);
    }

    #[tokio::test]
    async fn sign_up_tolerates_duplicate_users_row() {
        let users = Arc::new(StubUserStore::with_role(Ok(None)));
        *users.insert_error.lock().unwrap() =
            Some(CraftlinkError::Duplicate("row exists".into()));

        let service = SessionService::new(Arc::new(StubGateway { user: None }), users.clone());
        let account = NewAccount {
            name: "Pat".to_string(),
            email: "pat@example.com".to_string(),
            password: "hunter2".to_string(),
            role: Role::Provider,
        };

        let session = service.sign_up(&account).await.expect("signup should succeed");
        assert_eq!(session.user.email, "pat@example.com");
        assert_eq!(users.inserts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn sign_up_surfaces_non_duplicate_insert_errors() {
        let users = Arc::new(StubUserStore::with_role(Ok(None)));
        *users.insert_error.lock().unwrap() = Some(CraftlinkError::Storage("boom".into()));

        let service = SessionService::new(Arc::new(StubGateway { user: None }), users);
        let account = NewAccount {
            name: "Pat".to_string(),
            email: "pat@example.com".to_string(),
            password: "hunter2".to_string(),
            role: Role::Client,
        };

        let result = service.sign_up(&account).await;
        assert!(matches!(result, Err(CraftlinkError::Storage(_))));
    }
}
