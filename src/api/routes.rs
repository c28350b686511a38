//! API route handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::Serialize;

use super::server::SharedState;
use crate::auth::models::{LoginRequest, RegisterRequest, TokenResponse, UserInfo};
use crate::auth::CurrentUser;
use crate::error::Error;

// Response envelope

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub message: String,
    pub user: UserInfo,
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok("healthy"))
}

// Auth routes

pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, Error> {
    let id = state.sessions.register(&req.username, &req.password).await?;

    let info = UserInfo {
        id,
        username: req.username,
        last_login: None,
    };
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(info))))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, Error> {
    let session_token = state.sessions.login(&req.username, &req.password).await?;

    let ttl = chrono::Duration::minutes(state.auth.token_ttl_mins);
    let access_token = state.codec.issue(&req.username, &session_token, ttl).await?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

pub async fn logout(
    State(state): State<SharedState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<impl IntoResponse, Error> {
    state.sessions.logout(&current.session_token).await?;
    Ok(Json(ApiResponse::ok("logged out")))
}

pub async fn dashboard(Extension(current): Extension<CurrentUser>) -> impl IntoResponse {
    let message = format!("Welcome back, {}!", current.user.username);
    Json(ApiResponse::ok(DashboardResponse {
        message,
        user: current.user,
    }))
}
