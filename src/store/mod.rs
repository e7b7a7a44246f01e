// Persistent storage seams
//
// Both stores follow "the file on disk is the single source of truth":
// every operation reloads from durable storage, every mutation rewrites the
// whole collection. Traits keep the durable backend swappable in tests.

pub mod json_file;

use crate::core::errors::ServiceError;
use crate::core::models::{Listing, UserAccount};
use async_trait::async_trait;
use std::collections::BTreeMap;

pub use json_file::{JsonFileRecordStore, JsonFileUserStore};

/// Trait for the listing collection
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Read the full record collection from durable storage.
    ///
    /// Fails with `StorageUnavailable` when the backing resource cannot be
    /// read or is not well-formed. Malformed storage is never reported as an
    /// empty collection.
    async fn load_all(&self) -> Result<Vec<Listing>, ServiceError>;

    /// Overwrite the durable record collection with the given sequence.
    async fn replace_all(&self, records: Vec<Listing>) -> Result<(), ServiceError>;
}

/// Trait for the username -> account mapping
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Read all users. A store that does not exist yet yields an empty
    /// mapping (first-run), not an error.
    async fn load_all(&self) -> Result<BTreeMap<String, UserAccount>, ServiceError>;

    /// Overwrite the durable user mapping.
    async fn replace_all(&self, users: BTreeMap<String, UserAccount>) -> Result<(), ServiceError>;

    /// Look up a single account by username.
    async fn get(&self, username: &str) -> Result<Option<UserAccount>, ServiceError>;

    /// Insert or overwrite the entry for `user.username`, then persist the
    /// full mapping.
    async fn upsert(&self, user: UserAccount) -> Result<(), ServiceError>;
}
