//! Session management

use crate::auth::models::{NewUser, User};
use crate::auth::password;
use crate::error::{Error, Result};
use crate::store::UserStore;
use std::sync::Arc;
use uuid::Uuid;

/// Owns the single-session-per-user policy.
///
/// Per user, the session token moves `NoSession -> HasSession` on login and
/// back on logout; a second login while a session is live is rejected, never
/// merged. The store is the single source of truth: nothing is cached here,
/// so concurrent requests always act on current state.
#[derive(Clone)]
pub struct SessionManager {
    store: Arc<dyn UserStore>,
    bcrypt_cost: u32,
}

impl SessionManager {
    pub fn new(store: Arc<dyn UserStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// Register a new user with a null session and no login history.
    ///
    /// Fails with `UsernameTaken` when the name exists; the existing record is
    /// left untouched. Username comparison is exact-match, as stored.
    pub async fn register(&self, username: &str, password: &str) -> Result<i64> {
        if self.store.find_by_username(username).await?.is_some() {
            return Err(Error::UsernameTaken(username.to_string()));
        }

        let password_hash = password::hash_password(password, self.bcrypt_cost)?;
        let id = self
            .store
            .insert(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(username, "Registered new user");
        Ok(id)
    }

    /// Authenticate and open a session, returning the fresh session token.
    ///
    /// Unknown usernames and wrong passwords both surface as `AuthFailed` so
    /// callers cannot enumerate accounts. A user with a live session gets
    /// `AlreadyLoggedIn`; the existing token is never overwritten.
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let Some(user) = self.store.find_by_username(username).await? else {
            return Err(Error::AuthFailed);
        };

        if !password::verify_password(password, &user.password_hash) {
            return Err(Error::AuthFailed);
        }

        if user.has_session() {
            return Err(Error::AlreadyLoggedIn);
        }

        // The conditioned update is what actually enforces the invariant:
        // two racing logins both pass the check above, but only one claim
        // lands on the still-null session column.
        let session_token = Uuid::new_v4().to_string();
        let claimed = self
            .store
            .claim_session(user.id, &session_token, chrono::Utc::now())
            .await?;
        if !claimed {
            return Err(Error::AlreadyLoggedIn);
        }

        tracing::info!(username, "User logged in");
        Ok(session_token)
    }

    /// Close the session identified by `session_token`.
    ///
    /// Unknown tokens yield `SessionNotFound`, which also makes a repeated
    /// logout of the same token fail the second time.
    pub async fn logout(&self, session_token: &str) -> Result<()> {
        let user = self
            .store
            .find_by_session_token(session_token)
            .await?
            .ok_or(Error::SessionNotFound)?;

        self.store.clear_session(user.id).await?;

        tracing::info!(username = %user.username, "User logged out");
        Ok(())
    }

    /// Whether any user currently holds this session token
    pub async fn is_logged_in(&self, session_token: &str) -> Result<bool> {
        Ok(self
            .store
            .find_by_session_token(session_token)
            .await?
            .is_some())
    }

    /// Look up the user holding this session token, if any
    pub async fn user_by_session_token(&self, session_token: &str) -> Result<Option<User>> {
        self.store.find_by_session_token(session_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryUserStore;

    fn manager() -> SessionManager {
        SessionManager::new(Arc::new(MemoryUserStore::new()), 4)
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let manager = manager();
        manager
            .register("alice", "pw1")
            .await
            .expect("Failed to register");

        let token = manager.login("alice", "pw1").await.expect("Failed to log in");
        assert!(!token.is_empty());
        assert!(manager.is_logged_in(&token).await.unwrap());
    }

    #[tokio::test]
    async fn test_login_records_last_login() {
        let manager = manager();
        manager
            .register("alice", "pw1")
            .await
            .expect("Failed to register");

        let token = manager.login("alice", "pw1").await.expect("Failed to log in");
        let user = manager
            .user_by_session_token(&token)
            .await
            .unwrap()
            .expect("session should resolve to a user");
        assert!(user.last_login.is_some());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let manager = manager();
        manager
            .register("alice", "pw1")
            .await
            .expect("Failed to register");

        let wrong_password = manager.login("alice", "nope").await.unwrap_err();
        let unknown_user = manager.login("mallory", "pw1").await.unwrap_err();

        assert!(matches!(wrong_password, Error::AuthFailed));
        assert!(matches!(unknown_user, Error::AuthFailed));
    }

    #[tokio::test]
    async fn test_logout_unknown_token() {
        let manager = manager();
        let result = manager.logout("no-such-token").await;
        assert!(matches!(result, Err(Error::SessionNotFound)));
    }
}
