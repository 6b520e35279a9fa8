//! In-memory repository implementation.
//!
//! Mirrors the DynamoDB backend's semantics (overwrite on put, not-found
//! on conditioned update, idempotent delete) so handler tests exercise
//! the same behavior. Data is lost when the repository is dropped.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use userdir_core::record::Record;
use userdir_core::storage::{RecordRepository, RepositoryError, Result, UpdatePatch};

/// In-memory storage backend for testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<RwLock<HashMap<String, Record>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRepository {
    async fn put_record(&self, record: &Record) -> Result<()> {
        let mut records = self.records.write().await;
        records.insert(record.user_id.clone(), record.clone());
        Ok(())
    }

    async fn get_record(&self, user_id: &str) -> Result<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.get(user_id).cloned())
    }

    async fn scan_records(&self) -> Result<Vec<Record>> {
        let records = self.records.read().await;
        Ok(records.values().cloned().collect())
    }

    async fn update_record(&self, user_id: &str, patch: &UpdatePatch) -> Result<Record> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(user_id)
            .ok_or_else(|| RepositoryError::NotFound {
                id: user_id.to_string(),
            })?;

        for (field, value) in patch.fields() {
            record.fields.insert(field.clone(), value.clone());
        }

        Ok(record.clone())
    }

    async fn delete_record(&self, user_id: &str) -> Result<()> {
        let mut records = self.records.write().await;
        records.remove(user_id);
        Ok(())
    }
}
