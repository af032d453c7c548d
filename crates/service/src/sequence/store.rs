use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::errors::SequenceError;
use super::storage::{SequenceStorage, SequenceTxn};
use crate::metrics;

/// Atomic read-increment-write over an injected storage backend.
///
/// Holds no counter state of its own; every call re-reads the row inside a
/// fresh transaction and relies on the backend's row lock for linearization.
pub struct SequenceStore<S: SequenceStorage> {
    storage: Arc<S>,
}

impl<S: SequenceStorage> SequenceStore<S> {
    pub fn new(storage: Arc<S>) -> Self { Self { storage } }

    /// Increment the named sequence by one and return the new count.
    ///
    /// Makes a single attempt: any storage failure rolls the transaction
    /// back and is reported as [`SequenceError::StorageFailure`].
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::sequence::{SequenceStore, repo::memory::MemorySequenceStorage};
    /// let storage = Arc::new(MemorySequenceStorage::new());
    /// storage.insert("homepage", 10);
    /// let store = SequenceStore::new(storage);
    /// let next = tokio_test::block_on(store.increment("homepage")).unwrap();
    /// assert_eq!(next, 11);
    /// ```
    #[instrument(skip(self, name), fields(sequence = %name))]
    pub async fn increment(&self, name: &str) -> Result<i64, SequenceError> {
        let timer = metrics::INCREMENT_DURATION.start_timer();
        let res = self.increment_once(name).await;
        timer.observe_duration();
        match &res {
            Ok(count) => {
                metrics::record_outcome("ok");
                info!(count, "sequence_incremented");
            }
            Err(e) => {
                metrics::record_outcome(e.outcome());
                debug!(code = e.code(), "sequence_increment_failed");
            }
        }
        res
    }

    async fn increment_once(&self, name: &str) -> Result<i64, SequenceError> {
        models::sequence::validate_name(name)?;

        let mut txn = self.storage.begin().await?;

        let row = match txn.find_for_update(name).await {
            Ok(Some(row)) => row,
            Ok(None) => {
                rollback_quietly(txn).await;
                return Err(SequenceError::NotFound);
            }
            Err(e) => {
                rollback_quietly(txn).await;
                return Err(e.into());
            }
        };

        let Some(next) = row.count.checked_add(1) else {
            rollback_quietly(txn).await;
            return Err(SequenceError::StorageFailure(format!("sequence {} is at its maximum value", row.name)));
        };

        if let Err(e) = txn.update_count(row.id, next).await {
            rollback_quietly(txn).await;
            return Err(e.into());
        }

        txn.commit().await?;
        Ok(next)
    }
}

/// Roll back on an error path. A failed rollback still discards the
/// transaction's writes, so it is only logged.
async fn rollback_quietly<T: SequenceTxn>(txn: T) {
    if let Err(e) = txn.rollback().await {
        warn!(error = %e, "rollback failed");
    }
}
