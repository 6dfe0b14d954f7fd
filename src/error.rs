//! Error types for storeintel

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::auth::models::ErrorBody;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found. Run 'storeintel init' first.")]
    ConfigNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Cannot reach the server: {0}")]
    TransportFailure(String),

    #[error("Stored session is corrupt: {0}")]
    MalformedPersistedState(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status this error maps to at the API boundary
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InvalidCredentials | Error::MissingCredentials | Error::Unauthorized(_) => {
                StatusCode::UNAUTHORIZED
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
            "Server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
