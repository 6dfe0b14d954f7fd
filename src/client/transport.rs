//! Transport between the session client and the session service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::auth::models::{ErrorBody, LoginRequest, LoginResponse};
use crate::error::{Error, Result};

/// Carries login requests to the session service.
///
/// Implementations report an unreachable service as
/// [`Error::TransportFailure`]; that is the only error that lets the
/// session manager enter offline mode.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse>;
}

/// HTTP transport against the storeintel API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// GET a protected endpoint with the session token
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::TransportFailure(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| Error::Server(format!("Malformed response from {}: {}", path, e))),
            StatusCode::UNAUTHORIZED => {
                Err(Error::Unauthorized(error_message(response).await))
            }
            _ => Err(Error::Server(error_message(response).await)),
        }
    }
}

#[async_trait]
impl AuthTransport for HttpTransport {
    async fn login(&self, req: &LoginRequest) -> Result<LoginResponse> {
        let response = self
            .client
            .post(self.url("/auth/login"))
            .json(req)
            .send()
            .await
            .map_err(|e| Error::TransportFailure(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {
                let body = response
                    .json::<LoginResponse>()
                    .await
                    .map_err(|e| Error::Server(format!("Malformed login response: {}", e)))?;
                if body.success {
                    Ok(body)
                } else {
                    Err(Error::Server("Login was not accepted".to_string()))
                }
            }
            StatusCode::UNAUTHORIZED => {
                tracing::debug!("Login rejected: {}", error_message(response).await);
                Err(Error::InvalidCredentials)
            }
            _ => Err(Error::Server(error_message(response).await)),
        }
    }
}

async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => format!("HTTP {}", status),
    }
}
