use super::transaction::{ApprovalNumber, Transaction, TransactionId};
use crate::error::Result;
use async_trait::async_trait;

/// Storage for transactions owned by the gateway.
///
/// Implementations hand out clones; the only way to change a stored record is
/// to replace it through `update`.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Adds a new transaction. Fails with `DuplicateTransaction` if the id is taken.
    async fn insert(&self, tx: Transaction) -> Result<()>;
    async fn get(&self, tx_id: &TransactionId) -> Result<Option<Transaction>>;
    /// Replaces an existing transaction. Fails with `UnknownTransaction` if absent.
    async fn update(&self, tx: Transaction) -> Result<()>;
    /// Every stored transaction in insertion order, oldest first.
    async fn all_transactions(&self) -> Result<Vec<Transaction>>;
}

/// Mints identifiers for new transactions.
///
/// A generator never returns the same transaction id twice over its lifetime.
/// Approval numbers carry no uniqueness guarantee.
pub trait IdGenerator: Send + Sync {
    fn transaction_id(&self) -> TransactionId;
    fn approval_number(&self) -> ApprovalNumber;
}

/// Gateway operations that are subject to simulated latency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CardPayment,
    QrPayment,
    CashReceipt,
    Cancel,
    History,
}

/// Delay applied before each gateway operation.
#[async_trait]
pub trait Latency: Send + Sync {
    async fn wait(&self, operation: Operation);
}

pub type TransactionStoreBox = Box<dyn TransactionStore>;
pub type IdGeneratorBox = Box<dyn IdGenerator>;
pub type LatencyBox = Box<dyn Latency>;
