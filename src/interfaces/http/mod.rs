//! JSON-over-HTTP surface of the gateway.

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod validation;

use crate::application::gateway::PaymentGateway;
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub type SharedGateway = Arc<PaymentGateway>;

/// Builds the application router around a shared gateway.
pub fn create_app(gateway: SharedGateway) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/payment/card",
            post(handlers::card_payment).delete(handlers::cancel_payment),
        )
        .route("/api/payment/qr", post(handlers::qr_payment))
        .route("/api/payment/cashreceipt", post(handlers::cash_receipt))
        .route("/api/payment/history", get(handlers::history))
        .route("/api/payment/history/export", get(handlers::export_history))
        .layer(axum::middleware::from_fn(middleware::request_logger))
        .layer(CorsLayer::permissive())
        .with_state(gateway)
}
