// Password hashing and verification (bcrypt)

use crate::core::errors::ServiceError;
use bcrypt::{hash, verify, DEFAULT_COST};

/// One-way, salted, slow hash. Used at registration time.
pub fn hash_password(plain: &str) -> Result<String, ServiceError> {
    hash(plain, DEFAULT_COST).map_err(|e| ServiceError::HashingError(e.to_string()))
}

/// Check a plaintext password against a stored bcrypt hash.
///
/// A stored hash that bcrypt cannot parse counts as a failed match rather
/// than an error; the caller only ever learns pass/fail.
pub fn verify_password(plain: &str, password_hash: &str) -> bool {
    verify(plain, password_hash).unwrap_or(false)
}
