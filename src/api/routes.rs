//! API route handlers

use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde::{Deserialize, Serialize};

use super::server::AppState;
use crate::auth::{Claims, LoginRequest, LoginResponse};
use crate::demo;
use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
    pub timestamp: String,
    pub environment: String,
}

// Health check

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Store Intelligence API is running".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        environment: state.config.server.environment.clone(),
    })
}

// Authentication

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let sessions = state.sessions.clone();

    // bcrypt verification is CPU bound
    let session = tokio::task::spawn_blocking(move || {
        sessions.authenticate(&req.email, &req.password)
    })
    .await
    .map_err(|e| Error::Server(format!("login worker failed: {}", e)))??;

    Ok(Json(session.into()))
}

// Dashboard data, behind `require_auth`

pub async fn daily_stats() -> impl IntoResponse {
    Json(demo::daily_stats())
}

pub async fn sales_chart() -> impl IntoResponse {
    Json(demo::current_sales_chart())
}

pub async fn notifications() -> impl IntoResponse {
    Json(demo::notifications())
}

pub async fn stores() -> impl IntoResponse {
    Json(demo::stores())
}

pub async fn products() -> impl IntoResponse {
    Json(demo::products())
}

pub async fn create_sale(
    Extension(claims): Extension<Claims>,
    Json(req): Json<demo::NewSaleRequest>,
) -> impl IntoResponse {
    tracing::info!("Sale recorded by {}", claims.email);
    Json(demo::record_sale(req, &claims.email))
}
