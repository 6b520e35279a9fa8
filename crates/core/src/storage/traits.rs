use async_trait::async_trait;

use crate::record::Record;

use super::{Result, UpdatePatch};

/// Storage adapter for the users collection.
///
/// One invocation performs at most one of these operations; the backend is
/// the single source of truth for concurrent-write ordering.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Writes a record, overwriting any existing item with the same id.
    async fn put_record(&self, record: &Record) -> Result<()>;

    /// Point lookup by id. `Ok(None)` means the id does not exist and is
    /// never collapsed into an error.
    async fn get_record(&self, user_id: &str) -> Result<Option<Record>>;

    /// Returns every record in the collection, unordered and unpaged.
    async fn scan_records(&self) -> Result<Vec<Record>>;

    /// Applies a partial update and returns the post-update record.
    /// Fails with [`super::RepositoryError::NotFound`] when the id does
    /// not exist.
    async fn update_record(&self, user_id: &str, patch: &UpdatePatch) -> Result<Record>;

    /// Deletes by id. Deleting an absent id succeeds.
    async fn delete_record(&self, user_id: &str) -> Result<()>;
}
