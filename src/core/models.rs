// Domain models - listings, user accounts, token claims

use serde::{Deserialize, Serialize};

/// One real-estate listing.
///
/// Only `id` is structurally required; everything else the scraper produced
/// (price, address, features, date, ...) is carried opaquely so the stored
/// shape survives a load/replace round-trip byte-for-byte in meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

/// Persisted user account, keyed by username in the user file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub disabled: bool,
}

/// User view safe for HTTP responses - no password hash
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub disabled: bool,
}

impl From<UserAccount> for UserProfile {
    fn from(account: UserAccount) -> Self {
        Self {
            username: account.username,
            full_name: account.full_name,
            email: account.email,
            disabled: account.disabled,
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}
