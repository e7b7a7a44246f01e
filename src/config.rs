// Configuration management

use crate::core::errors::ServiceError;
use secrecy::Secret;
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
///
/// All configuration is validated on load with clear error messages. The
/// token signing key is wrapped in `Secret` so it cannot leak through Debug
/// output or logs.
#[derive(Debug, Clone)]
pub struct Config {
    // Server configuration
    pub bind_address: String,
    pub port: u16,

    // Storage paths
    pub records_path: PathBuf,
    pub users_path: PathBuf,

    // Token configuration
    pub token_secret: Secret<String>,
    pub token_ttl_minutes: u64,

    // Middleware configuration
    pub request_timeout_secs: u64,
    pub body_size_limit_bytes: usize,

    // Logging configuration
    pub log_level: String,
    pub log_format: String, // "json" or "text"
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Supports `.env` file loading in development (via dotenv crate).
    /// Validates all required fields and file paths.
    pub fn from_env() -> Result<Self, ServiceError> {
        // Load .env file if present (development)
        // Skip in test environment to avoid interfering with test environment variables
        #[cfg(not(test))]
        {
            dotenv::dotenv().ok(); // Ignore errors (file may not exist)
        }

        let config = Self {
            bind_address: Self::get_env_or_default("BIND_ADDRESS", "0.0.0.0"),
            port: Self::parse_port()?,
            records_path: PathBuf::from(Self::get_env_or_default("DATA_FILE_PATH", "data.json")),
            users_path: PathBuf::from(Self::get_env_or_default("USERS_FILE_PATH", "users.json")),
            token_secret: Secret::new(Self::get_required_env("TOKEN_SECRET")?),
            token_ttl_minutes: Self::parse_u64_or_default("TOKEN_TTL_MINUTES", 30)?,
            request_timeout_secs: Self::parse_u64_or_default("REQUEST_TIMEOUT_SECS", 30)?,
            body_size_limit_bytes: Self::parse_u64_or_default(
                "BODY_SIZE_LIMIT_BYTES",
                2 * 1024 * 1024,
            )? as usize,
            log_level: Self::get_env_or_default("LOG_LEVEL", "info"),
            log_format: Self::get_env_or_default("LOG_FORMAT", "json"),
        };

        // Post-load validation
        config.validate()?;

        Ok(config)
    }

    /// Get environment variable or return default value
    fn get_env_or_default(key: &str, default: &str) -> String {
        env::var(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get required environment variable
    fn get_required_env(key: &str) -> Result<String, ServiceError> {
        let value = env::var(key)
            .map_err(|_| ServiceError::ConfigurationError(format!("{} not set", key)))?;

        if value.is_empty() {
            return Err(ServiceError::ConfigurationError(format!("{} is empty", key)));
        }

        Ok(value)
    }

    /// Parse port from PORT environment variable
    fn parse_port() -> Result<u16, ServiceError> {
        let port_str = env::var("PORT").unwrap_or_else(|_| "8000".to_string());
        let port = port_str.parse::<u16>().map_err(|e| {
            ServiceError::ConfigurationError(format!("Invalid PORT value '{}': {}", port_str, e))
        })?;

        if port == 0 {
            return Err(ServiceError::ConfigurationError(
                "PORT must be between 1 and 65535".to_string(),
            ));
        }

        Ok(port)
    }

    /// Parse u64 from environment variable or return default
    fn parse_u64_or_default(key: &str, default: u64) -> Result<u64, ServiceError> {
        match env::var(key) {
            Ok(value) => {
                let parsed = value.parse::<u64>().map_err(|e| {
                    ServiceError::ConfigurationError(format!(
                        "Invalid {} value '{}': {}",
                        key, value, e
                    ))
                })?;

                if parsed == 0 {
                    return Err(ServiceError::ConfigurationError(format!(
                        "{} must be greater than 0",
                        key
                    )));
                }

                Ok(parsed)
            }
            _ => Ok(default),
        }
    }

    /// Validate all configuration values
    fn validate(&self) -> Result<(), ServiceError> {
        // The record file is the database; refuse to start without it.
        // The user file may be absent (created on first registration).
        if !self.records_path.is_file() {
            return Err(ServiceError::ConfigurationError(format!(
                "Record file not found at {:?}",
                self.records_path
            )));
        }

        Self::validate_log_level(&self.log_level)?;
        Self::validate_log_format(&self.log_format)?;

        Ok(())
    }

    /// Validate log level
    fn validate_log_level(level: &str) -> Result<(), ServiceError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&level.to_lowercase().as_str()) {
            return Err(ServiceError::ConfigurationError(format!(
                "Invalid LOG_LEVEL '{}': must be one of {}",
                level,
                valid_levels.join(", ")
            )));
        }
        Ok(())
    }

    /// Validate log format
    fn validate_log_format(format: &str) -> Result<(), ServiceError> {
        if format != "json" && format != "text" {
            return Err(ServiceError::ConfigurationError(format!(
                "Invalid LOG_FORMAT '{}': must be 'json' or 'text'",
                format
            )));
        }
        Ok(())
    }
}

impl Config {
    /// Create a test configuration for unit and integration tests
    ///
    /// Bypasses environment variable loading and file validation.
    pub fn test_config(records_path: PathBuf, users_path: PathBuf) -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8000,
            records_path,
            users_path,
            token_secret: Secret::new("integration-test-signing-key".to_string()),
            token_ttl_minutes: 30,
            request_timeout_secs: 30,
            body_size_limit_bytes: 2 * 1024 * 1024,
            log_level: "info".to_string(),
            log_format: "json".to_string(),
        }
    }
}
