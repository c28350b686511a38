//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::sync::Arc;
use std::time::Duration;

use crate::api;
use crate::auth::SecretRotator;
use crate::config;
use crate::store::PgUserStore;

/// Initialize a new turnstile.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("turnstile.toml");

    if config_path.exists() {
        tracing::warn!("turnstile.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    println!("Created turnstile.toml");
    println!("Edit the configuration file and run 'turnstile serve' to start the server");

    Ok(())
}

/// Start the authentication server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = config::load_config()?;

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    let store = PgUserStore::connect(&config.database).await?;
    store.ensure_schema().await?;

    let rotator = SecretRotator::new();
    let rotation = rotator.start(Duration::from_secs(config.auth.rotation_hours * 60 * 60));

    tracing::info!("Starting server at http://{}:{}", host, port);

    let result = api::run_server(Arc::new(store), rotator, config.auth.clone(), &host, port).await;

    rotation.abort();
    result?;
    Ok(())
}
