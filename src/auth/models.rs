//! Authentication models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted user record
#[derive(Debug, Clone)]
pub struct User {
    /// Store-assigned identifier
    pub id: i64,
    /// Username for login, unique and immutable post-creation
    pub username: String,
    /// bcrypt hash of the password, salt embedded
    pub password_hash: String,
    /// Opaque session token; present iff the user has a live session
    pub session_token: Option<String>,
    /// Timestamp of the most recent successful login
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Whether the user currently holds a live session
    pub fn has_session(&self) -> bool {
        self.session_token.is_some()
    }
}

/// A user record about to be inserted
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}

/// Registration credentials
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Login credentials
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response with the signed bearer credential
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// User information in responses
#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub last_login: Option<DateTime<Utc>>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            last_login: user.last_login,
        }
    }
}
