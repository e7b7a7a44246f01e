// Axum bearer authentication middleware

use crate::api::responses::ApiError;
use crate::auth::service::AuthService;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::warn;

/// Authentication middleware for protected routes.
///
/// Extracts the token from the `Authorization: Bearer` header, resolves it to
/// a user account, and sets the account in request extensions for handlers
/// to use. Any failure short-circuits with a 401.
pub async fn require_bearer(
    State(auth): State<Arc<AuthService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(request.headers()).ok_or_else(|| {
        warn!("Request to protected route without bearer token");
        ApiError::unauthorized()
    })?;

    let account = auth.resolve_current_user(&token).await.map_err(|e| {
        warn!(error = %e, "Bearer token rejected");
        ApiError::from(e)
    })?;

    request.extensions_mut().insert(account);
    Ok(next.run(request).await)
}

/// Extract the bearer token from request headers
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}
