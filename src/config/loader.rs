//! Configuration loading and environment variable interpolation

use crate::auth::directory::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::auth::jwt::MAX_TOKEN_TTL_HOURS;
use crate::error::{Error, Result};
use regex::Regex;
use std::env;
use std::fs;
use std::path::Path;

use super::Config;

pub const CONFIG_FILENAME: &str = "storeintel.toml";

/// Load configuration from storeintel.toml
pub fn load_config() -> Result<Config> {
    let config_path = find_config_file()?;
    load_config_from_path(&config_path)
}

/// Load configuration, falling back to defaults when no file exists
pub fn load_config_or_default() -> Result<Config> {
    match load_config() {
        Err(Error::ConfigNotFound) => {
            tracing::debug!("No {} found, using defaults", CONFIG_FILENAME);
            Ok(Config::default())
        }
        other => other,
    }
}

/// Load configuration from a specific path
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|_| Error::ConfigNotFound)?;
    let content = interpolate_env_vars(&content);
    let config: Config = toml::from_str(&content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.auth.jwt_secret.is_empty() {
        return Err(Error::Config("auth.jwt_secret must not be empty".to_string()));
    }
    if !(1..=MAX_TOKEN_TTL_HOURS).contains(&config.auth.token_ttl_hours) {
        return Err(Error::Config(format!(
            "auth.token_ttl_hours must be between 1 and {}",
            MAX_TOKEN_TTL_HOURS
        )));
    }
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&config.auth.bcrypt_cost) {
        return Err(Error::Config(format!(
            "auth.bcrypt_cost must be between {} and {}",
            MIN_BCRYPT_COST, MAX_BCRYPT_COST
        )));
    }
    if config.client.offline_secret.is_empty() {
        return Err(Error::Config(
            "client.offline_secret must not be empty".to_string(),
        ));
    }
    if config.client.offline_secret == config.auth.jwt_secret {
        return Err(Error::Config(
            "client.offline_secret must differ from auth.jwt_secret".to_string(),
        ));
    }
    Ok(())
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
    r#"# storeintel configuration

[server]
host = "0.0.0.0"
port = 3000
static_dir = "./public"
environment = "${APP_ENV:-development}"

[auth]
jwt_secret = "${JWT_SECRET:-store-intelligence-secret-key-2024}"
token_ttl_hours = 24
bcrypt_cost = 10

# Replace the built-in demo users. Generate hashes with `storeintel hash-password`.
# [[auth.users]]
# email = "admin@company.uz"
# name = "System Administrator"
# role = "admin"
# avatar = "👑"
# password_hash = "$2b$10$..."

[client]
base_url = "http://127.0.0.1:3000"
session_file = "./.storeintel/session.json"
# Sign in against the local demo users when the server cannot be reached
offline_fallback = false
# Signs offline tokens; must differ from auth.jwt_secret
offline_secret = "${STOREINTEL_OFFLINE_SECRET:-storeintel-offline}"
timeout_secs = 10
"#
}
