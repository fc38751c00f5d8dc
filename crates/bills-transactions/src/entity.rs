//! Stored transaction.

use crate::model::CreationRequest;
use crate::storage::Record;
use serde::{Deserialize, Serialize};

/// A stored transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Identifier assigned by storage, starting at 1.
    pub id: u64,
    /// Short label.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Amount.
    pub price: f64,
    /// ISO currency code.
    pub currency: String,
    /// `CREDIT` or `DEBIT`.
    #[serde(rename = "type")]
    pub kind: String,
}

impl From<CreationRequest> for Transaction {
    fn from(request: CreationRequest) -> Self {
        Self {
            id: 0,
            title: request.title,
            description: request.description,
            price: request.price,
            currency: request.currency,
            kind: request.kind,
        }
    }
}

impl Record for Transaction {
    fn id(&self) -> u64 {
        self.id
    }

    fn assign_id(&mut self, id: u64) {
        self.id = id;
    }
}
