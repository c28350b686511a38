//! Persistent user store

pub mod memory;
pub mod postgres;

pub use memory::MemoryUserStore;
pub use postgres::PgUserStore;

use crate::auth::models::{NewUser, User};
use crate::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Capability interface over persistent user records.
///
/// The store is the single source of truth for session state. Session claiming
/// is a single conditioned update rather than read-then-write, so the
/// single-session invariant holds under concurrent logins.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by exact username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Look up a user by live session token
    async fn find_by_session_token(&self, session_token: &str) -> Result<Option<User>>;

    /// Insert a new user record, returning its id.
    ///
    /// Fails with `UsernameTaken` when the username is already present.
    async fn insert(&self, user: NewUser) -> Result<i64>;

    /// Set the session token and last-login timestamp, but only if the user
    /// has no live session. Returns whether the claim landed.
    async fn claim_session(&self, id: i64, session_token: &str, at: DateTime<Utc>) -> Result<bool>;

    /// Clear the user's session token
    async fn clear_session(&self, id: i64) -> Result<()>;
}
