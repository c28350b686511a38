//! Configuration loading and environment variable interpolation

use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;

use super::Config;

const CONFIG_FILENAME: &str = "turnstile.toml";

/// Load configuration from turnstile.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

/// Find the configuration file, searching upward from current directory
fn find_config_file() -> Result<std::path::PathBuf> {
    let mut current = env::current_dir().map_err(|e| Error::Config(e.to_string()))?;

    loop {
        let config_path = current.join(CONFIG_FILENAME);
        if config_path.exists() {
            return Ok(config_path);
        }

        if !current.pop() {
            return Err(Error::ConfigNotFound);
        }
    }
}

/// Interpolate environment variables in the format ${VAR_NAME} or ${VAR_NAME:-default}
fn interpolate_env_vars(content: &str) -> String {
    // This regex is a compile-time constant, panicking is acceptable here
    // as it indicates a programming error in the codebase, not a runtime issue
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)(?::-([^}]*))?\}")
        .expect("Invalid regex pattern - this is a bug in the codebase");

    re.replace_all(content, |caps: &regex::Captures| {
        let var_name = &caps[1];
        let default = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        env::var(var_name).unwrap_or_else(|_| default.to_string())
    })
    .to_string()
}

/// Generate a default configuration file content
pub fn default_config_content() -> &'static str {
    r#"# Turnstile Configuration

[server]
host = "0.0.0.0"
port = 8000

# Persistent user store
[database]
host = "${TURNSTILE_DB_HOST:-localhost}"
port = 5432
user = "${TURNSTILE_DB_USER:-postgres}"
password = "${TURNSTILE_DB_PASSWORD:-postgres}"
name = "turnstile"

[auth]
# Bearer credential lifetime in minutes
token_ttl_mins = 30
# Signing-secret rotation interval in hours
rotation_hours = 24
# bcrypt work factor
bcrypt_cost = 12
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_interpolation() {
        env::set_var("TEST_TURNSTILE_VAR", "hello");
        let content = "value = \"${TEST_TURNSTILE_VAR}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"hello\"");
        env::remove_var("TEST_TURNSTILE_VAR");
    }

    #[test]
    fn test_env_interpolation_with_default() {
        let content = "value = \"${NONEXISTENT_VAR:-default_value}\"";
        let result = interpolate_env_vars(content);
        assert_eq!(result, "value = \"default_value\"");
    }

    #[test]
    fn test_default_config_parses() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, default_config_content()).expect("write config");

        let config = load_config_from_path(&path).expect("default config should load");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.auth.bcrypt_cost, 12);
    }

    #[test]
    fn test_missing_config_file() {
        let result = load_config_from_path(Path::new("/nonexistent/turnstile.toml"));
        assert!(matches!(result, Err(Error::ConfigNotFound)));
    }
}
