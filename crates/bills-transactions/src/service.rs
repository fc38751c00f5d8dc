//! Transaction use cases.

use crate::entity::Transaction;
use crate::model::CreationRequest;
use crate::storage::{Storage, StorageError};
use std::sync::Arc;

/// Creates and reads transactions through a [`Storage`].
#[derive(Clone)]
pub struct TransactionService {
    storage: Arc<dyn Storage<Transaction>>,
}

impl TransactionService {
    /// Creates a service over `storage`.
    pub fn new(storage: Arc<dyn Storage<Transaction>>) -> Self {
        Self { storage }
    }

    /// Stores a new transaction built from a validated request.
    pub fn create(&self, request: CreationRequest) -> Result<Transaction, StorageError> {
        self.storage.create(Transaction::from(request))
    }

    /// Looks up a transaction.
    pub fn find(&self, id: u64) -> Result<Option<Transaction>, StorageError> {
        self.storage.find(id)
    }

    /// Lists every transaction.
    pub fn list(&self) -> Result<Vec<Transaction>, StorageError> {
        self.storage.list()
    }
}

impl std::fmt::Debug for TransactionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;

    struct Offline;

    impl Storage<Transaction> for Offline {
        fn create(&self, _: Transaction) -> Result<Transaction, StorageError> {
            Err(StorageError::Unavailable("ledger offline".to_string()))
        }

        fn find(&self, _: u64) -> Result<Option<Transaction>, StorageError> {
            Err(StorageError::Unavailable("ledger offline".to_string()))
        }

        fn list(&self) -> Result<Vec<Transaction>, StorageError> {
            Err(StorageError::Unavailable("ledger offline".to_string()))
        }
    }

    fn groceries() -> CreationRequest {
        CreationRequest {
            title: "Supermarket".to_string(),
            description: "Monthly shop".to_string(),
            price: 53.25,
            currency: "EUR".to_string(),
            kind: "CREDIT".to_string(),
        }
    }

    #[test]
    fn test_create_then_find() {
        let service = TransactionService::new(Arc::new(InMemoryStorage::<Transaction>::new()));
        let created = service.create(groceries()).unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.title, "Supermarket");

        let found = service.find(1).unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(service.list().unwrap(), vec![created]);
    }

    #[test]
    fn test_storage_failure_surfaces() {
        let service = TransactionService::new(Arc::new(Offline));
        let error = service.create(groceries()).unwrap_err();
        assert_eq!(error.to_string(), "storage unavailable: ledger offline");
        assert!(service.find(1).is_err());
        assert!(service.list().is_err());
    }
}
