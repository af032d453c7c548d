use async_trait::async_trait;

use super::domain::SequenceRow;
use super::errors::StorageError;

/// Transactional storage capability the sequence store is written against.
///
/// Implementations must give read-committed isolation or stronger, and
/// `find_for_update` must hold a write lock on the returned row until the
/// transaction ends, so concurrent increments of one name are serialized.
#[async_trait]
pub trait SequenceStorage: Send + Sync {
    type Txn: SequenceTxn;

    async fn begin(&self) -> Result<Self::Txn, StorageError>;
}

/// One open transaction. Dropping it without `commit` discards its writes.
#[async_trait]
pub trait SequenceTxn: Send {
    /// Point lookup by unique name, locking the row for the rest of the transaction.
    async fn find_for_update(&mut self, name: &str) -> Result<Option<SequenceRow>, StorageError>;

    /// Point update by row identity.
    async fn update_count(&mut self, id: i64, count: i64) -> Result<(), StorageError>;

    async fn commit(self) -> Result<(), StorageError>;

    async fn rollback(self) -> Result<(), StorageError>;
}
