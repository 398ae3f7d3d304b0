#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use pos_gateway::application::gateway::{GatewayMode, PaymentGateway};
use pos_gateway::domain::payment::{
    CancelRequest, CardPaymentRequest, CashReceiptRequest, QrPaymentRequest,
};
use pos_gateway::domain::transaction::{Amount, CardNumber, QrType, ReceiptType, TransactionId};
use pos_gateway::infrastructure::ids::SequentialIdGenerator;
use pos_gateway::infrastructure::in_memory::InMemoryTransactionStore;
use pos_gateway::infrastructure::latency::NoLatency;
use pos_gateway::interfaces::http::create_app;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const VALID_CARD: &str = "1234-5678-9012-3456";

/// A simulation gateway that never sleeps.
pub fn gateway() -> PaymentGateway {
    gateway_in(GatewayMode::Simulation)
}

pub fn gateway_in(mode: GatewayMode) -> PaymentGateway {
    PaymentGateway::new(
        mode,
        Box::new(InMemoryTransactionStore::new()),
        Box::new(SequentialIdGenerator::new()),
        Box::new(NoLatency),
    )
}

pub fn card(amount: u64, number: &str) -> CardPaymentRequest {
    CardPaymentRequest {
        amount: Amount::new(amount).unwrap(),
        card_number: CardNumber::new(number),
        expiry_month: "12".to_string(),
        expiry_year: "29".to_string(),
        installment: 0,
        order_name: "Americano x2".to_string(),
        customer_name: Some("Park".to_string()),
        customer_phone: None,
    }
}

pub fn qr(amount: u64, qr_type: QrType) -> QrPaymentRequest {
    QrPaymentRequest {
        amount: Amount::new(amount).unwrap(),
        qr_type,
        order_name: "Croissant".to_string(),
        customer_phone: Some("01012341234".to_string()),
    }
}

pub fn cash_receipt(amount: u64) -> CashReceiptRequest {
    CashReceiptRequest {
        amount: Amount::new(amount).unwrap(),
        receipt_type: ReceiptType::Personal,
        phone_number: Some("01012341234".to_string()),
        registration_number: None,
        order_name: "Cookies".to_string(),
    }
}

pub fn cancel(transaction_id: &TransactionId) -> CancelRequest {
    CancelRequest {
        transaction_id: transaction_id.clone(),
        cancel_reason: "customer request".to_string(),
        cancel_amount: None,
    }
}

/// Router over a fresh no-latency simulation gateway.
pub fn app() -> Router {
    create_app(Arc::new(gateway()))
}

/// Sends one request through the router and decodes the JSON answer.
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}
