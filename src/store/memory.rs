//! In-memory user store for tests and demos

use crate::auth::models::{NewUser, User};
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::UserStore;

/// User store holding records in process memory.
///
/// Mirrors the conditioned-update semantics of the PostgreSQL store: session
/// claiming checks and writes under a single write lock.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_session_token(&self, session_token: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.session_token.as_deref() == Some(session_token))
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<i64> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == user.username) {
            return Err(Error::UsernameTaken(user.username));
        }

        let id = users.len() as i64 + 1;
        users.push(User {
            id,
            username: user.username,
            password_hash: user.password_hash,
            session_token: None,
            last_login: None,
        });
        Ok(id)
    }

    async fn claim_session(&self, id: i64, session_token: &str, at: DateTime<Utc>) -> Result<bool> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(false);
        };

        if user.session_token.is_some() {
            return Ok(false);
        }
        user.session_token = Some(session_token.to_string());
        user.last_login = Some(at);
        Ok(true)
    }

    async fn clear_session(&self, id: i64) -> Result<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.session_token = None;
        }
        Ok(())
    }
}
