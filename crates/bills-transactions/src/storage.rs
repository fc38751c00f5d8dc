//! Record persistence.
//!
//! [`Storage`] is the seam between the service and the backing store. The only
//! backend shipped is [`InMemoryStorage`], which hands out sequential ids
//! starting at 1.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// A value that storage can identify.
pub trait Record: Clone + Send + Sync + 'static {
    /// Current identifier, `0` until stored.
    fn id(&self) -> u64;

    /// Sets the identifier chosen by storage.
    fn assign_id(&mut self, id: u64);
}

/// Failure of a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot serve requests.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// The id sequence is exhausted.
    #[error("no identifiers left")]
    IdsExhausted,
}

/// Persistence for records of type `T`.
pub trait Storage<T: Record>: Send + Sync {
    /// Stores `record` under a fresh id and returns the stored copy.
    fn create(&self, record: T) -> Result<T, StorageError>;

    /// Looks up a record by id.
    fn find(&self, id: u64) -> Result<Option<T>, StorageError>;

    /// All records in id order.
    fn list(&self) -> Result<Vec<T>, StorageError>;
}

/// Process-local storage.
#[derive(Debug)]
pub struct InMemoryStorage<T> {
    records: RwLock<BTreeMap<u64, T>>,
    next_id: AtomicU64,
}

impl<T> InMemoryStorage<T> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` when nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl<T> Default for InMemoryStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> Storage<T> for InMemoryStorage<T> {
    fn create(&self, mut record: T) -> Result<T, StorageError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if id == 0 {
            return Err(StorageError::IdsExhausted);
        }
        record.assign_id(id);
        self.records.write().insert(id, record.clone());
        Ok(record)
    }

    fn find(&self, id: u64) -> Result<Option<T>, StorageError> {
        Ok(self.records.read().get(&id).cloned())
    }

    fn list(&self) -> Result<Vec<T>, StorageError> {
        Ok(self.records.read().values().cloned().collect())
    }
}
