// Listing operations over the record store

use crate::core::errors::ServiceError;
use crate::core::models::Listing;
use crate::store::RecordStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

/// List, fetch, and delete listings.
///
/// Every operation reloads the collection from storage, so each request is
/// consistent with the latest completed write. Deletion is the only mutation
/// and holds `write_lock` across its load-mutate-rewrite sequence, which
/// serializes racing deletes within this process. Concurrent writers in
/// other processes keep last-writer-wins semantics on the backing file.
pub struct RecordService {
    store: Arc<dyn RecordStore>,
    write_lock: Mutex<()>,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Return the full collection in storage order.
    pub async fn list_all(&self) -> Result<Vec<Listing>, ServiceError> {
        self.store.load_all().await
    }

    /// Fetch the first listing whose `id` matches.
    pub async fn get_by_id(&self, id: i64) -> Result<Listing, ServiceError> {
        self.store
            .load_all()
            .await?
            .into_iter()
            .find(|record| record.id == id)
            .ok_or(ServiceError::NotFound)
    }

    /// Remove the first listing whose `id` matches, persist the remainder,
    /// and return the removed listing. An unknown id leaves storage untouched.
    pub async fn delete_by_id(&self, id: i64) -> Result<Listing, ServiceError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.store.load_all().await?;
        let position = records
            .iter()
            .position(|record| record.id == id)
            .ok_or(ServiceError::NotFound)?;

        let removed = records.remove(position);
        self.store.replace_all(records).await?;
        info!(id = id, "Listing deleted");
        Ok(removed)
    }
}
