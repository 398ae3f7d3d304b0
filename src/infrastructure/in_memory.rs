use crate::domain::ports::TransactionStore;
use crate::domain::transaction::{Transaction, TransactionId};
use crate::error::{PaymentError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Ledger {
    /// Transactions in insertion order.
    entries: Vec<Transaction>,
    /// Position of each transaction in `entries`.
    index: HashMap<TransactionId, usize>,
}

/// A thread-safe in-memory store for transactions.
///
/// Uses `Arc<RwLock<..>>` so clones share the same data. Records live as long
/// as the process; nothing is persisted.
#[derive(Default, Clone)]
pub struct InMemoryTransactionStore {
    ledger: Arc<RwLock<Ledger>>,
}

impl InMemoryTransactionStore {
    /// Creates a new, empty in-memory transaction store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert(&self, tx: Transaction) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        if ledger.index.contains_key(&tx.transaction_id) {
            return Err(PaymentError::DuplicateTransaction(tx.transaction_id));
        }
        let position = ledger.entries.len();
        ledger.index.insert(tx.transaction_id.clone(), position);
        ledger.entries.push(tx);
        Ok(())
    }

    async fn get(&self, tx_id: &TransactionId) -> Result<Option<Transaction>> {
        let ledger = self.ledger.read().await;
        Ok(ledger
            .index
            .get(tx_id)
            .and_then(|&position| ledger.entries.get(position))
            .cloned())
    }

    async fn update(&self, tx: Transaction) -> Result<()> {
        let mut ledger = self.ledger.write().await;
        let Some(&position) = ledger.index.get(&tx.transaction_id) else {
            return Err(PaymentError::UnknownTransaction(tx.transaction_id));
        };
        ledger.entries[position] = tx;
        Ok(())
    }

    async fn all_transactions(&self) -> Result<Vec<Transaction>> {
        let ledger = self.ledger.read().await;
        Ok(ledger.entries.clone())
    }
}
