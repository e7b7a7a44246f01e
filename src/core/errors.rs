// Domain error types - Secure error handling with no information disclosure

use thiserror::Error;

/// Main error type for the service
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Persisted data could not be read or written (HTTP 500)
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Bad username/password at login (HTTP 400)
    #[error("Incorrect username or password")]
    InvalidCredentials,

    /// Missing, malformed, expired, or unresolvable bearer token (HTTP 401)
    #[error("Could not validate credentials")]
    InvalidToken,

    /// Username already taken at registration (HTTP 400)
    #[error("Username already exists")]
    Conflict,

    /// Unknown record id (HTTP 404)
    #[error("Item not found")]
    NotFound,

    /// Password hashing failure (HTTP 500)
    #[error("Password hashing failed: {0}")]
    HashingError(String),

    /// Token signing failure (HTTP 500)
    #[error("Token signing failed: {0}")]
    SigningError(String),

    /// Configuration error (startup only, HTTP 500)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ServiceError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::StorageUnavailable(_) => 500,
            ServiceError::InvalidCredentials => 400,
            ServiceError::InvalidToken => 401,
            ServiceError::Conflict => 400,
            ServiceError::NotFound => 404,
            ServiceError::HashingError(_) => 500,
            ServiceError::SigningError(_) => 500,
            ServiceError::ConfigurationError(_) => 500,
        }
    }

    /// Get user-friendly error message (no sensitive information)
    pub fn user_message(&self) -> String {
        match self {
            ServiceError::StorageUnavailable(_) => "Storage unavailable".to_string(),
            ServiceError::InvalidCredentials => "Incorrect username or password".to_string(),
            ServiceError::InvalidToken => "Could not validate credentials".to_string(),
            ServiceError::Conflict => "Username already exists".to_string(),
            ServiceError::NotFound => "Item not found".to_string(),
            ServiceError::HashingError(_) => "Internal error".to_string(),
            ServiceError::SigningError(_) => "Internal error".to_string(),
            ServiceError::ConfigurationError(_) => "Internal error".to_string(),
        }
    }
}
