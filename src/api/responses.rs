// Response types for API endpoints

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::core::models::Listing;

/// Success response for POST /token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// Bare confirmation message (user creation)
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Message plus the listing it refers to (fetch/delete by id)
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub message: String,
    pub item: Listing,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub records: String,
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// API error type that converts domain errors to HTTP responses
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub request_id: Option<String>,
}

impl ApiError {
    /// Generic 401 for requests that never presented a token
    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "Could not validate credentials".to_string(),
            request_id: None,
        }
    }

    /// Create from ServiceError
    pub fn from_service_error(err: crate::core::errors::ServiceError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            message: err.user_message(),
            request_id: None,
        }
    }

    /// Create from ServiceError with request ID
    pub fn from_service_error_with_id(
        err: crate::core::errors::ServiceError,
        request_id: String,
    ) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self {
            status,
            message: err.user_message(),
            request_id: Some(request_id),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message,
            request_id: self.request_id,
        });

        let mut response = (self.status, body).into_response();
        if self.status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<crate::core::errors::ServiceError> for ApiError {
    fn from(err: crate::core::errors::ServiceError) -> Self {
        ApiError::from_service_error(err)
    }
}
