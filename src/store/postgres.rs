//! PostgreSQL user store

use crate::auth::models::{NewUser, User};
use crate::config::DatabaseConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio_postgres::error::SqlState;
use tokio_postgres::{Client, NoTls, Row};

use super::UserStore;

/// User store backed by a PostgreSQL connection
pub struct PgUserStore {
    client: Client,
}

impl PgUserStore {
    /// Connect to the configured database
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let conn_string = format!(
            "host={} port={} user={} password={} dbname={}",
            config.host, config.port, config.user, config.password, config.name
        );

        let (client, connection) = tokio_postgres::connect(&conn_string, NoTls).await?;

        // Spawn the connection handler
        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!("PostgreSQL connection error: {}", e);
            }
        });

        tracing::info!(
            host = %config.host,
            dbname = %config.name,
            "Connected to PostgreSQL"
        );

        Ok(Self { client })
    }

    /// Create the users table if it does not exist
    pub async fn ensure_schema(&self) -> Result<()> {
        self.client
            .batch_execute(
                "CREATE TABLE IF NOT EXISTS users (
                    id BIGSERIAL PRIMARY KEY,
                    username VARCHAR(50) UNIQUE NOT NULL,
                    password_hash VARCHAR(255) NOT NULL,
                    session_token VARCHAR(255),
                    last_login TIMESTAMPTZ
                )",
            )
            .await?;
        Ok(())
    }
}

fn row_to_user(row: &Row) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        session_token: row.get("session_token"),
        last_login: row.get("last_login"),
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = self
            .client
            .query_opt(
                "SELECT id, username, password_hash, session_token, last_login
                 FROM users WHERE username = $1",
                &[&username],
            )
            .await?;
        Ok(row.as_ref().map(row_to_user))
    }

    async fn find_by_session_token(&self, session_token: &str) -> Result<Option<User>> {
        let row = self
            .client
            .query_opt(
                "SELECT id, username, password_hash, session_token, last_login
                 FROM users WHERE session_token = $1",
                &[&session_token],
            )
            .await?;
        Ok(row.as_ref().map(row_to_user))
    }

    async fn insert(&self, user: NewUser) -> Result<i64> {
        let row = self
            .client
            .query_one(
                "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id",
                &[&user.username, &user.password_hash],
            )
            .await
            .map_err(|e| {
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    Error::UsernameTaken(user.username.clone())
                } else {
                    Error::StoreUnavailable(e)
                }
            })?;
        Ok(row.get(0))
    }

    async fn claim_session(&self, id: i64, session_token: &str, at: DateTime<Utc>) -> Result<bool> {
        // Conditioned on the session column still being null; racing logins
        // cannot both match.
        let updated = self
            .client
            .execute(
                "UPDATE users SET session_token = $1, last_login = $2
                 WHERE id = $3 AND session_token IS NULL",
                &[&session_token, &at, &id],
            )
            .await?;
        Ok(updated == 1)
    }

    async fn clear_session(&self, id: i64) -> Result<()> {
        self.client
            .execute("UPDATE users SET session_token = NULL WHERE id = $1", &[&id])
            .await?;
        Ok(())
    }
}
