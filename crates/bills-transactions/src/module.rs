//! Assembly of the transaction module.
//!
//! ```
//! use bills_transactions::{ModuleBuilder, Transaction};
//! use bills_transactions::storage::InMemoryStorage;
//! use std::sync::Arc;
//!
//! let provider = ModuleBuilder::new()
//!     .with_in_memory_storage(Arc::new(InMemoryStorage::<Transaction>::new()))
//!     .build()
//!     .unwrap();
//! assert_eq!(provider.router().len(), 2);
//! ```

use crate::entity::Transaction;
use crate::route::TransactionRoutes;
use crate::service::TransactionService;
use crate::storage::{InMemoryStorage, Storage};
use bills_server::Router;
use std::sync::Arc;
use thiserror::Error;

/// Invalid module assembly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModuleError {
    /// A storage backend was supplied twice.
    #[error("storage already defined")]
    StorageAlreadyDefined,

    /// No storage backend was supplied.
    #[error("the transaction storage is not defined")]
    StorageMissing,
}

/// Collects the module's dependencies.
#[derive(Default)]
pub struct ModuleBuilder {
    storage: Option<Arc<dyn Storage<Transaction>>>,
    error: Option<ModuleError>,
}

impl ModuleBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses process-local storage.
    pub fn with_in_memory_storage(self, storage: Arc<InMemoryStorage<Transaction>>) -> Self {
        self.with_storage(storage)
    }

    /// Uses any storage backend.
    pub fn with_storage(mut self, storage: Arc<dyn Storage<Transaction>>) -> Self {
        if self.storage.is_some() {
            if self.error.is_none() {
                self.error = Some(ModuleError::StorageAlreadyDefined);
            }
        } else {
            self.storage = Some(storage);
        }
        self
    }

    /// Finishes assembly.
    pub fn build(self) -> Result<ModuleProvider, ModuleError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let storage = self.storage.ok_or(ModuleError::StorageMissing)?;
        Ok(ModuleProvider {
            service: TransactionService::new(storage),
        })
    }
}

impl std::fmt::Debug for ModuleBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleBuilder")
            .field("has_storage", &self.storage.is_some())
            .field("error", &self.error)
            .finish()
    }
}

/// The assembled module.
#[derive(Debug, Clone)]
pub struct ModuleProvider {
    service: TransactionService,
}

impl ModuleProvider {
    /// The transaction service.
    pub fn service(&self) -> &TransactionService {
        &self.service
    }

    /// The request handlers.
    pub fn routes(&self) -> TransactionRoutes {
        TransactionRoutes::new(self.service.clone())
    }

    /// A router holding every transaction endpoint.
    pub fn router(&self) -> Router {
        self.routes().register(Router::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory() -> Arc<InMemoryStorage<Transaction>> {
        Arc::new(InMemoryStorage::new())
    }

    #[test]
    fn test_build_with_storage() {
        let provider = ModuleBuilder::new()
            .with_in_memory_storage(memory())
            .build()
            .unwrap();
        assert!(provider.service().list().unwrap().is_empty());
    }

    #[test]
    fn test_storage_defined_twice() {
        let error = ModuleBuilder::new()
            .with_in_memory_storage(memory())
            .with_in_memory_storage(memory())
            .build()
            .unwrap_err();
        assert_eq!(error, ModuleError::StorageAlreadyDefined);
    }

    #[test]
    fn test_storage_missing() {
        let error = ModuleBuilder::new().build().unwrap_err();
        assert_eq!(error, ModuleError::StorageMissing);
        assert_eq!(error.to_string(), "the transaction storage is not defined");
    }

    #[test]
    fn test_provider_shares_storage() {
        let storage = memory();
        let provider = ModuleBuilder::new()
            .with_in_memory_storage(Arc::clone(&storage))
            .build()
            .unwrap();
        provider
            .service()
            .create(crate::model::CreationRequest::default())
            .unwrap();
        assert_eq!(storage.len(), 1);
    }
}
