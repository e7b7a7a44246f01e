// Bearer token issuance and verification (HS256 JWT)

use crate::core::errors::ServiceError;
use crate::core::models::Claims;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

/// Stateless token signer/verifier.
///
/// The signing key is process-wide configuration, loaded once at startup.
/// Validity of a token is fully determined by its signature and expiry at
/// verification time; there is no server-side session record.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &Secret<String>, ttl: Duration) -> Self {
        let key_bytes = secret.expose_secret().as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(key_bytes),
            decoding_key: DecodingKey::from_secret(key_bytes),
            ttl,
        }
    }

    /// Produce a signed token with subject `username` and expiry now + ttl.
    pub fn issue(&self, username: &str) -> Result<String, ServiceError> {
        let claims = Claims {
            sub: username.to_string(),
            exp: Utc::now().timestamp() + self.ttl.as_secs() as i64,
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::SigningError(e.to_string()))
    }

    /// Check signature and expiry; return the subject username.
    ///
    /// Malformed tokens, bad signatures, and past expiries all collapse into
    /// the same `InvalidToken` rejection.
    pub fn verify(&self, token: &str) -> Result<String, ServiceError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims.sub)
            .map_err(|_| ServiceError::InvalidToken)
    }
}
