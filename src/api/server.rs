//! HTTP API server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::authenticate;
use crate::auth::{SecretRotator, SessionManager, TokenCodec};
use crate::config::AuthConfig;
use crate::error::Result;
use crate::store::UserStore;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub sessions: SessionManager,
    pub codec: TokenCodec,
    pub auth: AuthConfig,
}

pub type SharedState = Arc<AppState>;

/// Run the HTTP API server
pub async fn run_server(
    store: Arc<dyn UserStore>,
    rotator: SecretRotator,
    auth: AuthConfig,
    host: &str,
    port: u16,
) -> Result<()> {
    let state = Arc::new(AppState {
        sessions: SessionManager::new(store, auth.bcrypt_cost),
        codec: TokenCodec::new(rotator),
        auth,
    });

    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
fn create_router(state: SharedState) -> Router {
    let protected = Router::new()
        .route("/api/logout", post(routes::logout))
        .route("/api/dashboard", get(routes::dashboard))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/register", post(routes::register))
        .route("/api/login", post(routes::login))
        .merge(protected)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
