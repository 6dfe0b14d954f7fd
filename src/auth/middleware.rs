//! Authentication middleware and extractors

use std::sync::Arc;

use crate::auth::{Claims, SessionService};
use crate::error::{Error, Result};
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Extract the bearer token from the Authorization header
pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Extract and verify user claims from request
pub fn extract_user_from_request(service: &SessionService, req: &Request) -> Result<Claims> {
    let token = extract_token(req.headers())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Unauthorized("No authentication token found".to_string()))?;
    service.verify(token)
}

/// Middleware for requiring authentication. Verified claims are placed in
/// the request extensions for handlers.
pub async fn require_auth(
    State(service): State<Arc<SessionService>>,
    mut req: Request,
    next: Next,
) -> std::result::Result<Response, Error> {
    let claims = extract_user_from_request(&service, &req).inspect_err(|e| {
        tracing::debug!("Rejected {} {}: {}", req.method(), req.uri().path(), e);
    })?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
