// Request handlers for API endpoints

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Json,
    Extension, Form,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::api::responses::{
    ApiError, HealthResponse, ItemResponse, MessageResponse, TokenResponse,
};
use crate::api::AppState;
use crate::core::models::{Listing, UserAccount, UserProfile};

/// Form body for POST /token
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// JSON body for POST /create_user
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub full_name: String,
    pub email: String,
}

/// Token issuance handler
///
/// POST /token
///
/// Accepts form-encoded `username` and `password`; returns a signed bearer
/// token. Every rejection is the same 400 so the response never confirms
/// whether a username exists.
pub async fn login_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Json<TokenResponse>, ApiError> {
    info!(username = %form.username, "Token requested");

    let access_token = state.auth.login(&form.username, &form.password).await?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}

/// Registration handler
///
/// POST /create_user
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .auth
        .register_user(
            &request.username,
            &request.password,
            &request.full_name,
            &request.email,
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "User created successfully".to_string(),
    }))
}

/// Current-user handler
///
/// GET /users/me
///
/// The account is resolved by the auth middleware; this just strips the
/// password hash.
pub async fn current_user_handler(
    Extension(account): Extension<UserAccount>,
) -> Json<UserProfile> {
    Json(account.into())
}

/// Full-collection handler
///
/// GET /data
pub async fn list_records_handler(
    State(state): State<AppState>,
    Extension(account): Extension<UserAccount>,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let records = state.records.list_all().await.map_err(|e| {
        warn!(error = %e, username = %account.username, "Listing fetch failed");
        ApiError::from(e)
    })?;

    Ok(Json(records))
}

/// Single-record handler
///
/// GET /data/{id}
pub async fn get_record_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Extension(account): Extension<UserAccount>,
    Path(id): Path<i64>,
) -> Result<Json<ItemResponse>, ApiError> {
    let request_id = request_id_from(&headers);

    let item = state
        .records
        .get_by_id(id)
        .await
        .map_err(|e| ApiError::from_service_error_with_id(e, request_id))?;

    info!(id = id, username = %account.username, "Listing fetched");

    Ok(Json(ItemResponse {
        message: "Item obtained successfully".to_string(),
        item,
    }))
}

/// Deletion handler
///
/// DELETE /data/{id}
///
/// The only mutating route. Returns the removed listing so the caller can
/// confirm what was deleted.
pub async fn delete_record_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Extension(account): Extension<UserAccount>,
    Path(id): Path<i64>,
) -> Result<Json<ItemResponse>, ApiError> {
    let request_id = request_id_from(&headers);

    let item = state
        .records
        .delete_by_id(id)
        .await
        .map_err(|e| ApiError::from_service_error_with_id(e, request_id))?;

    info!(id = id, username = %account.username, "Listing deleted via API");

    Ok(Json(ItemResponse {
        message: "Item deleted successfully".to_string(),
        item,
    }))
}

/// Health check handler
///
/// GET /health
///
/// Unauthenticated. Reports whether the record collection is readable.
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, ApiError> {
    state.records.list_all().await.map_err(|e| {
        warn!(error = %e, "Health check failed to read record storage");
        ApiError::from(e)
    })?;

    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        records: "available".to_string(),
    }))
}

/// Take the caller's x-request-id or generate one
fn request_id_from(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
}
