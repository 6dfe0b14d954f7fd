//! HTTP API server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use chrono::Duration;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::auth::{require_auth, JwtKeys, SessionService, StaticDirectory, UserDirectory};
use crate::config::Config;
use crate::error::{Error, Result};

use super::routes;

/// Application state shared across handlers. Everything in it is immutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub sessions: Arc<SessionService>,
}

impl AppState {
    /// Build the session service from configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let ttl = Duration::try_hours(config.auth.token_ttl_hours)
            .filter(|ttl| *ttl > Duration::zero())
            .ok_or_else(|| {
                Error::Config(format!(
                    "auth.token_ttl_hours out of range: {}",
                    config.auth.token_ttl_hours
                ))
            })?;

        let directory: Arc<dyn UserDirectory> = if config.auth.users.is_empty() {
            tracing::info!("No users configured, using built-in demo users");
            Arc::new(StaticDirectory::demo(config.auth.bcrypt_cost)?)
        } else {
            Arc::new(StaticDirectory::from_config(&config.auth.users))
        };

        let keys = JwtKeys::new(config.auth.jwt_secret.as_bytes(), ttl);

        Ok(Self {
            config: Arc::new(config),
            sessions: Arc::new(SessionService::new(directory, keys)),
        })
    }
}

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = AppState::from_config(config)?;
    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/analytics/daily-stats", get(routes::daily_stats))
        .route("/api/analytics/sales-chart", get(routes::sales_chart))
        .route("/api/inventory/notifications", get(routes::notifications))
        .route("/api/stores", get(routes::stores))
        .route("/api/products", get(routes::products))
        .route("/api/sales", post(routes::create_sale))
        .route_layer(middleware::from_fn_with_state(
            state.sessions.clone(),
            require_auth,
        ));

    let mut router = Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/auth/login", post(routes::login))
        .merge(protected);

    let static_dir = &state.config.server.static_dir;
    if static_dir.is_dir() {
        tracing::info!("Serving front end from {}", static_dir.display());
        let index = static_dir.join("index.html");
        router = router.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)));
    }

    router
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
