use chrono::Utc;
use pos_gateway::application::gateway::{GatewayMode, PaymentGateway};
use pos_gateway::domain::history::HistoryFilter;
use pos_gateway::domain::ports::{
    IdGeneratorBox, LatencyBox, TransactionStore, TransactionStoreBox,
};
use pos_gateway::domain::transaction::{
    Amount, ApprovalNumber, MethodDetails, QrType, Transaction, TransactionId,
};
use pos_gateway::infrastructure::ids::UuidIdGenerator;
use pos_gateway::infrastructure::in_memory::InMemoryTransactionStore;
use pos_gateway::infrastructure::latency::SimulatedLatency;

mod common;

#[tokio::test]
async fn test_store_as_trait_object() {
    let store: TransactionStoreBox = Box::new(InMemoryTransactionStore::new());

    let tx = Transaction::approved(
        TransactionId::new("TXN1"),
        ApprovalNumber::new("11223344"),
        Amount::new(2500).unwrap(),
        "Green tea".to_string(),
        None,
        MethodDetails::Qr {
            qr_type: QrType::ZeroPay,
        },
        Utc::now(),
    );

    // Verify Send + Sync by spawning a task
    let handle = tokio::spawn(async move {
        store.insert(tx).await.unwrap();
        store.get(&TransactionId::new("TXN1")).await.unwrap().unwrap()
    });

    let retrieved = handle.await.unwrap();
    assert_eq!(retrieved.amount.value(), 2500);
}

#[tokio::test]
async fn test_shared_store_between_clones() {
    let store = InMemoryTransactionStore::new();
    let gateway = PaymentGateway::new(
        GatewayMode::Simulation,
        Box::new(store.clone()),
        Box::new(UuidIdGenerator),
        Box::new(SimulatedLatency::new(0)),
    );

    let paid = gateway
        .qr_payment(common::qr(9900, QrType::KakaoPay))
        .await
        .unwrap();

    let stored = store.get(&paid.transaction_id).await.unwrap().unwrap();
    assert_eq!(stored.order_name, "Croissant");
    assert!(paid.transaction_id.as_str().starts_with("TXN"));
}

#[tokio::test]
async fn test_gateway_from_boxed_ports() {
    let store: TransactionStoreBox = Box::new(InMemoryTransactionStore::new());
    let ids: IdGeneratorBox = Box::new(UuidIdGenerator);
    let latency: LatencyBox = Box::new(SimulatedLatency::new(0));
    let gateway = PaymentGateway::new(GatewayMode::Simulation, store, ids, latency);

    let handle = tokio::spawn(async move {
        gateway
            .card_payment(common::card(1000, common::VALID_CARD))
            .await
            .unwrap();
        gateway.history(&HistoryFilter::default()).await.unwrap()
    });

    let page = handle.await.unwrap();
    assert_eq!(page.total, 1);
}
