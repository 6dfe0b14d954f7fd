//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::auth::models::{StoreId, UserRole};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

/// Server configuration for the HTTP API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Front end assets served for non-API paths, if the directory exists
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Reported by the health endpoint
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./public")
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            environment: default_environment(),
        }
    }
}

/// Token signing and user directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,

    #[serde(default = "default_token_ttl_hours")]
    pub token_ttl_hours: i64,

    /// bcrypt cost used when hashing the built-in demo passwords
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Users with pre-hashed passwords. Empty means the built-in demo users.
    #[serde(default)]
    pub users: Vec<UserEntry>,
}

fn default_jwt_secret() -> String {
    "store-intelligence-secret-key-2024".to_string()
}

fn default_token_ttl_hours() -> i64 {
    crate::auth::jwt::DEFAULT_TOKEN_TTL_HOURS
}

fn default_bcrypt_cost() -> u32 {
    10
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_hours: default_token_ttl_hours(),
            bcrypt_cost: default_bcrypt_cost(),
            users: Vec::new(),
        }
    }
}

/// A configured directory user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEntry {
    pub email: String,
    pub name: String,
    pub role: UserRole,

    #[serde(default)]
    pub store_id: Option<StoreId>,

    #[serde(default = "default_avatar")]
    pub avatar: String,

    /// bcrypt hash, see `storeintel hash-password`
    pub password_hash: String,
}

fn default_avatar() -> String {
    "🙂".to_string()
}

/// Session client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// File holding the persisted session
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,

    /// Log in against the local demo identities when the server is unreachable
    #[serde(default = "default_offline_fallback")]
    pub offline_fallback: bool,

    /// Signing secret for locally issued offline tokens
    #[serde(default = "default_offline_secret")]
    pub offline_secret: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_session_file() -> PathBuf {
    PathBuf::from("./.storeintel/session.json")
}

fn default_offline_fallback() -> bool {
    false
}

fn default_offline_secret() -> String {
    "storeintel-offline".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_file: default_session_file(),
            offline_fallback: default_offline_fallback(),
            offline_secret: default_offline_secret(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
