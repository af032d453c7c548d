//! In-memory storage backend used as a test double.
//!
//! Each row carries its own async mutex. `find_for_update` takes that lock and
//! keeps it until the transaction commits, rolls back or is dropped, which
//! mirrors `SELECT ... FOR UPDATE`. Writes are staged in the transaction and
//! only applied on a successful commit.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::{Mutex as RowLock, OwnedMutexGuard};

use crate::sequence::domain::SequenceRow;
use crate::sequence::errors::StorageError;
use crate::sequence::storage::{SequenceStorage, SequenceTxn};

/// Step at which an injected fault fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailPoint {
    Begin,
    Find,
    Update,
    Commit,
}

#[derive(Default)]
struct Inner {
    rows: Mutex<HashMap<String, (i64, Arc<RowLock<i64>>)>>,
    faults: Mutex<Vec<FailPoint>>,
    next_id: AtomicI64,
    accesses: AtomicUsize,
}

impl Inner {
    fn rows(&self) -> MutexGuard<'_, HashMap<String, (i64, Arc<RowLock<i64>>)>> {
        self.rows.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn touch(&self, point: FailPoint) -> Result<(), StorageError> {
        self.accesses.fetch_add(1, Ordering::SeqCst);
        let faults = self.faults.lock().unwrap_or_else(PoisonError::into_inner);
        if faults.contains(&point) {
            return Err(StorageError(format!("injected {point:?} failure")));
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemorySequenceStorage {
    inner: Arc<Inner>,
}

impl MemorySequenceStorage {
    pub fn new() -> Self { Self::default() }

    /// Provision a row, returning its id. Replaces an existing row of the same name.
    pub fn insert(&self, name: &str, count: i64) -> i64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.rows().insert(name.to_string(), (id, Arc::new(RowLock::new(count))));
        id
    }

    /// Committed count for `name`. Waits if a transaction holds the row.
    pub async fn get(&self, name: &str) -> Option<i64> {
        let lock = self.inner.rows().get(name).map(|(_, l)| Arc::clone(l))?;
        let count = *lock.lock().await;
        Some(count)
    }

    pub fn len(&self) -> usize { self.inner.rows().len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Number of storage calls made so far (begin, find, update, commit).
    pub fn accesses(&self) -> usize { self.inner.accesses.load(Ordering::SeqCst) }

    /// Make every call at `point` fail until `clear_faults`.
    pub fn inject_fault(&self, point: FailPoint) {
        self.inner.faults.lock().unwrap_or_else(PoisonError::into_inner).push(point);
    }

    pub fn clear_faults(&self) {
        self.inner.faults.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

pub struct MemorySequenceTxn {
    inner: Arc<Inner>,
    locked: Option<(i64, OwnedMutexGuard<i64>)>,
    staged: Option<i64>,
}

#[async_trait]
impl SequenceStorage for MemorySequenceStorage {
    type Txn = MemorySequenceTxn;

    async fn begin(&self) -> Result<Self::Txn, StorageError> {
        self.inner.touch(FailPoint::Begin)?;
        Ok(MemorySequenceTxn { inner: Arc::clone(&self.inner), locked: None, staged: None })
    }
}

#[async_trait]
impl SequenceTxn for MemorySequenceTxn {
    async fn find_for_update(&mut self, name: &str) -> Result<Option<SequenceRow>, StorageError> {
        self.inner.touch(FailPoint::Find)?;
        let found = self.inner.rows().get(name).map(|(id, l)| (*id, Arc::clone(l)));
        let Some((id, lock)) = found else {
            return Ok(None);
        };
        let guard = lock.lock_owned().await;
        let row = SequenceRow { id, name: name.to_string(), count: *guard };
        self.locked = Some((id, guard));
        Ok(Some(row))
    }

    async fn update_count(&mut self, id: i64, count: i64) -> Result<(), StorageError> {
        self.inner.touch(FailPoint::Update)?;
        match &self.locked {
            Some((locked_id, _)) if *locked_id == id => {
                self.staged = Some(count);
                Ok(())
            }
            _ => Err(StorageError(format!("row {id} is not locked by this transaction"))),
        }
    }

    async fn commit(mut self) -> Result<(), StorageError> {
        self.inner.touch(FailPoint::Commit)?;
        if let (Some((_, guard)), Some(count)) = (self.locked.as_mut(), self.staged) {
            **guard = count;
        }
        Ok(())
    }

    async fn rollback(self) -> Result<(), StorageError> {
        Ok(())
    }
}
