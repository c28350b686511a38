//! Authentication middleware for protected routes

use crate::api::server::SharedState;
use crate::auth::models::UserInfo;
use crate::error::{Error, Result};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

/// The authenticated caller, inserted as a request extension
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: UserInfo,
    pub session_token: String,
}

/// Pull the bearer token out of the Authorization header
fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(Error::InvalidCredential)
}

/// Middleware guarding protected routes.
///
/// A verified signature and unexpired claims are not enough: the embedded
/// session token must still be the one on record for the subject, so a
/// credential that outlives its logout is rejected here.
pub async fn authenticate(
    State(state): State<SharedState>,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let token = bearer_token(req.headers())?;
    let claims = state.codec.verify(token).await?;

    let user = state
        .sessions
        .user_by_session_token(&claims.session_token)
        .await?
        .ok_or(Error::SessionNotFound)?;

    if user.username != claims.sub {
        return Err(Error::InvalidCredential);
    }

    req.extensions_mut().insert(CurrentUser {
        user: user.into(),
        session_token: claims.session_token,
    });
    Ok(next.run(req).await)
}
