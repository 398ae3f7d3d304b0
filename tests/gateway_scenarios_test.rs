use pos_gateway::domain::history::HistoryFilter;
use pos_gateway::domain::transaction::{PaymentMethod, PaymentStatus, QrType};
use std::collections::HashSet;

mod common;

#[tokio::test]
async fn test_card_payment_scenario() {
    let gateway = common::gateway();

    let result = gateway
        .card_payment(common::card(10000, common::VALID_CARD))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.status, PaymentStatus::Approved);
    assert_eq!(result.amount, 10000);
    let approval = result.approval_number.expect("approval number");
    assert!(!approval.as_str().is_empty());
}

#[tokio::test]
async fn test_invalid_card_scenario() {
    let gateway = common::gateway();

    let result = gateway.card_payment(common::card(10000, "123")).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.status, PaymentStatus::Failed);
    assert_eq!(result.message, "invalid card number");

    let history = gateway.history(&HistoryFilter::default()).await.unwrap();
    assert!(history
        .items
        .iter()
        .all(|item| item.transaction_id != result.transaction_id));
    assert_eq!(history.total, 0);
}

#[tokio::test]
async fn test_two_qr_payments_listed_in_creation_order() {
    let gateway = common::gateway();

    let first = gateway
        .qr_payment(common::qr(4000, QrType::KakaoPay))
        .await
        .unwrap();
    let second = gateway
        .qr_payment(common::qr(6000, QrType::KakaoPay))
        .await
        .unwrap();

    let filter = HistoryFilter {
        page: Some(1),
        limit: Some(10),
        ..Default::default()
    };
    let history = gateway.history(&filter).await.unwrap();

    assert_eq!(history.total, 2);
    assert_eq!(history.items.len(), 2);
    assert_eq!(history.items[0].transaction_id, first.transaction_id);
    assert_eq!(history.items[1].transaction_id, second.transaction_id);
    assert!(history.items.iter().all(|item| item.method == PaymentMethod::Qr));
}

#[tokio::test]
async fn test_cancel_scenario() {
    let gateway = common::gateway();
    let paid = gateway
        .card_payment(common::card(10000, common::VALID_CARD))
        .await
        .unwrap();

    let cancelled = gateway.cancel(common::cancel(&paid.transaction_id)).await.unwrap();
    assert!(cancelled.success);
    assert_eq!(cancelled.status, PaymentStatus::Cancelled);

    let again = gateway.cancel(common::cancel(&paid.transaction_id)).await.unwrap();
    assert!(!again.success);
    assert_eq!(again.status, PaymentStatus::Cancelled);
    assert_eq!(again.amount, paid.amount);
}

#[tokio::test]
async fn test_transaction_ids_are_unique() {
    let gateway = common::gateway();
    let mut seen = HashSet::new();

    for i in 1..=100u64 {
        let result = match i % 3 {
            0 => gateway
                .card_payment(common::card(i * 100, common::VALID_CARD))
                .await
                .unwrap(),
            1 => gateway
                .qr_payment(common::qr(i * 100, QrType::ZeroPay))
                .await
                .unwrap(),
            _ => gateway
                .issue_cash_receipt(common::cash_receipt(i * 100))
                .await
                .unwrap(),
        };
        assert!(result.success);
        assert!(seen.insert(result.transaction_id), "duplicate transaction id");
    }

    let history = gateway.history(&HistoryFilter::default()).await.unwrap();
    assert_eq!(history.total, 100);
}

#[tokio::test]
async fn test_identical_requests_create_distinct_transactions() {
    let gateway = common::gateway();

    let first = gateway
        .card_payment(common::card(5000, common::VALID_CARD))
        .await
        .unwrap();
    let second = gateway
        .card_payment(common::card(5000, common::VALID_CARD))
        .await
        .unwrap();

    assert_ne!(first.transaction_id, second.transaction_id);
    let history = gateway.history(&HistoryFilter::default()).await.unwrap();
    assert_eq!(history.total, 2);
}
