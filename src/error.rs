//! Error types for Turnstile

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] tokio_postgres::Error),

    #[error("Invalid username or password")]
    AuthFailed,

    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    #[error("User is already logged in")]
    AlreadyLoggedIn,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Invalid bearer credential")]
    InvalidCredential,

    #[error("Bearer credential expired")]
    ExpiredCredential,

    #[error("Config file not found. Run 'turnstile init' first.")]
    ConfigNotFound,

    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::AuthFailed
            | Error::InvalidCredential
            | Error::ExpiredCredential
            | Error::SessionNotFound => StatusCode::UNAUTHORIZED,
            Error::UsernameTaken(_) | Error::AlreadyLoggedIn => StatusCode::CONFLICT,
            Error::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(serde_json::json!({
            "success": false,
            "data": null,
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
