// JSON-file-backed stores
//
// Whole-file read and rewrite per operation. Writes go to a sibling temp
// file first and are renamed into place so a crashed write never corrupts
// the collection. A per-resource mutex serializes writers within this
// process; racing processes keep last-writer-wins semantics.

use crate::core::errors::ServiceError;
use crate::core::models::{Listing, UserAccount};
use crate::store::{RecordStore, UserStore};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Listing collection persisted as a JSON array
pub struct JsonFileRecordStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileRecordStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RecordStore for JsonFileRecordStore {
    async fn load_all(&self) -> Result<Vec<Listing>, ServiceError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ServiceError::StorageUnavailable(format!(
                "failed to read record file {:?}: {}",
                self.path, e
            ))
        })?;

        let records: Vec<Listing> = serde_json::from_str(&raw).map_err(|e| {
            ServiceError::StorageUnavailable(format!(
                "record file {:?} is not a well-formed listing array: {}",
                self.path, e
            ))
        })?;

        debug!(count = records.len(), "Record collection loaded");
        Ok(records)
    }

    async fn replace_all(&self, records: Vec<Listing>) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        let serialized = serde_json::to_string_pretty(&records).map_err(|e| {
            ServiceError::StorageUnavailable(format!("failed to serialize records: {}", e))
        })?;

        write_atomic(&self.path, &serialized).await?;
        debug!(count = records.len(), "Record collection replaced");
        Ok(())
    }
}

/// Username -> account mapping persisted as a JSON object
pub struct JsonFileUserStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileUserStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    async fn read_users(&self) -> Result<BTreeMap<String, UserAccount>, ServiceError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            // First run: no user file yet
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(BTreeMap::new());
            }
            Err(e) => {
                return Err(ServiceError::StorageUnavailable(format!(
                    "failed to read user file {:?}: {}",
                    self.path, e
                )));
            }
        };

        serde_json::from_str(&raw).map_err(|e| {
            ServiceError::StorageUnavailable(format!(
                "user file {:?} is not a well-formed user mapping: {}",
                self.path, e
            ))
        })
    }

    async fn write_users(&self, users: &BTreeMap<String, UserAccount>) -> Result<(), ServiceError> {
        let serialized = serde_json::to_string_pretty(users).map_err(|e| {
            ServiceError::StorageUnavailable(format!("failed to serialize users: {}", e))
        })?;
        write_atomic(&self.path, &serialized).await
    }
}

#[async_trait]
impl UserStore for JsonFileUserStore {
    async fn load_all(&self) -> Result<BTreeMap<String, UserAccount>, ServiceError> {
        self.read_users().await
    }

    async fn replace_all(&self, users: BTreeMap<String, UserAccount>) -> Result<(), ServiceError> {
        let _guard = self.write_lock.lock().await;
        self.write_users(&users).await
    }

    async fn get(&self, username: &str) -> Result<Option<UserAccount>, ServiceError> {
        Ok(self.read_users().await?.remove(username))
    }

    async fn upsert(&self, user: UserAccount) -> Result<(), ServiceError> {
        // Hold the lock across the read-modify-write so two upserts in this
        // process cannot interleave and drop an entry.
        let _guard = self.write_lock.lock().await;
        let mut users = self.read_users().await?;
        users.insert(user.username.clone(), user);
        self.write_users(&users).await
    }
}

/// Write `contents` to a temp file next to `path`, then rename into place.
async fn write_atomic(path: &Path, contents: &str) -> Result<(), ServiceError> {
    let tmp_path = path.with_extension("tmp");

    tokio::fs::write(&tmp_path, contents).await.map_err(|e| {
        ServiceError::StorageUnavailable(format!("failed to write {:?}: {}", tmp_path, e))
    })?;

    tokio::fs::rename(&tmp_path, path).await.map_err(|e| {
        ServiceError::StorageUnavailable(format!(
            "failed to move {:?} into place at {:?}: {}",
            tmp_path, path, e
        ))
    })
}
