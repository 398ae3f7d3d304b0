use crate::domain::history::{HistoryFilter, HistoryItem, HistoryPage};
use crate::domain::payment::{
    CancelRequest, CardPaymentRequest, CashReceiptRequest, PaymentIntent, PaymentResult,
    QrPaymentRequest,
};
use crate::domain::ports::{IdGeneratorBox, LatencyBox, Operation, TransactionStoreBox};
use crate::domain::transaction::Transaction;
use crate::error::{PaymentError, Result};
use crate::infrastructure::ids::SequentialIdGenerator;
use crate::infrastructure::in_memory::InMemoryTransactionStore;
use crate::infrastructure::latency::SimulatedLatency;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Which backend the gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatewayMode {
    /// Everything is processed in memory.
    #[default]
    Simulation,
    /// A real card network. Not implemented; every operation fails.
    Live,
}

/// The mock payment gateway.
///
/// `PaymentGateway` owns the transaction store and is the only component that
/// mutates stored transactions. It is `Send + Sync` and meant to be shared
/// behind an `Arc`.
pub struct PaymentGateway {
    mode: GatewayMode,
    store: TransactionStoreBox,
    ids: IdGeneratorBox,
    latency: LatencyBox,
    /// Serialises the lookup-check-write sequence of `cancel`.
    cancel_lock: Mutex<()>,
}

impl PaymentGateway {
    /// Creates a new `PaymentGateway`.
    ///
    /// # Arguments
    ///
    /// * `mode` - Simulation or live backend.
    /// * `store` - The store for transactions.
    /// * `ids` - Generator for transaction ids and approval numbers.
    /// * `latency` - Delay applied before each operation.
    pub fn new(
        mode: GatewayMode,
        store: TransactionStoreBox,
        ids: IdGeneratorBox,
        latency: LatencyBox,
    ) -> Self {
        Self {
            mode,
            store,
            ids,
            latency,
            cancel_lock: Mutex::new(()),
        }
    }

    /// A simulation gateway with an in-memory store, sequential ids and the
    /// default simulated latency.
    pub fn simulation() -> Self {
        Self::new(
            GatewayMode::Simulation,
            Box::new(InMemoryTransactionStore::new()),
            Box::new(SequentialIdGenerator::new()),
            Box::new(SimulatedLatency::default()),
        )
    }

    pub fn mode(&self) -> GatewayMode {
        self.mode
    }

    pub async fn card_payment(&self, request: CardPaymentRequest) -> Result<PaymentResult> {
        self.create(&request).await
    }

    pub async fn qr_payment(&self, request: QrPaymentRequest) -> Result<PaymentResult> {
        self.create(&request).await
    }

    pub async fn issue_cash_receipt(&self, request: CashReceiptRequest) -> Result<PaymentResult> {
        self.create(&request).await
    }

    /// Screens, records and approves a payment of any kind.
    ///
    /// A screening rejection still mints a transaction id for the caller but
    /// stores nothing. Identical requests create distinct transactions.
    pub async fn create<P: PaymentIntent>(&self, intent: &P) -> Result<PaymentResult> {
        self.ensure_simulation()?;
        self.latency.wait(intent.operation()).await;

        let transaction_id = self.ids.transaction_id();
        if let Err(rejection) = intent.screen() {
            warn!(
                transaction_id = %transaction_id,
                method = intent.method().as_str(),
                reason = %rejection.message,
                "payment rejected"
            );
            return Ok(PaymentResult::failed(
                transaction_id,
                intent.amount().value(),
                intent.method(),
                rejection.message,
            ));
        }

        let tx = Transaction::approved(
            transaction_id,
            self.ids.approval_number(),
            intent.amount(),
            intent.order_name().to_string(),
            intent.customer_name().map(str::to_string),
            intent.details(),
            Utc::now(),
        );
        self.store.insert(tx.clone()).await?;

        info!(
            transaction_id = %tx.transaction_id,
            method = tx.method().as_str(),
            amount = tx.amount.value(),
            "payment approved"
        );
        Ok(PaymentResult::approved(&tx, intent.approval_message()))
    }

    /// Cancels an approved transaction in full.
    ///
    /// Unknown ids, already cancelled transactions and partial amounts come
    /// back as unsuccessful results. A successful cancel is the only mutation
    /// of an existing record.
    pub async fn cancel(&self, request: CancelRequest) -> Result<PaymentResult> {
        self.ensure_simulation()?;
        self.latency.wait(Operation::Cancel).await;

        let _guard = self.cancel_lock.lock().await;
        let Some(mut tx) = self.store.get(&request.transaction_id).await? else {
            warn!(transaction_id = %request.transaction_id, "cancel of unknown transaction");
            return Ok(PaymentResult::not_found(request.transaction_id));
        };

        if let Err(rejection) = tx.cancel(request.cancel_reason, request.cancel_amount, Utc::now())
        {
            warn!(
                transaction_id = %tx.transaction_id,
                reason = rejection.message(),
                "cancel rejected"
            );
            return Ok(PaymentResult::rejected(&tx, rejection.message().to_string()));
        }
        self.store.update(tx.clone()).await?;

        info!(
            transaction_id = %tx.transaction_id,
            amount = tx.amount.value(),
            "payment cancelled"
        );
        Ok(PaymentResult::cancelled(&tx))
    }

    /// One page of the filtered history, oldest first.
    pub async fn history(&self, filter: &HistoryFilter) -> Result<HistoryPage> {
        self.ensure_simulation()?;
        self.latency.wait(Operation::History).await;

        let transactions = self.store.all_transactions().await?;
        Ok(HistoryPage::select(&transactions, filter))
    }

    /// Every transaction matching `filter`, ignoring its page and limit.
    pub async fn export_history(&self, filter: &HistoryFilter) -> Result<Vec<HistoryItem>> {
        self.ensure_simulation()?;
        self.latency.wait(Operation::History).await;

        let transactions = self.store.all_transactions().await?;
        Ok(transactions
            .iter()
            .filter(|tx| filter.matches(tx))
            .map(HistoryItem::from)
            .collect())
    }

    fn ensure_simulation(&self) -> Result<()> {
        match self.mode {
            GatewayMode::Simulation => Ok(()),
            GatewayMode::Live => Err(PaymentError::NotImplemented(
                "live payment gateway integration",
            )),
        }
    }
}
