use super::SharedGateway;
use super::error::ApiError;
use super::validation::{CancelBody, CardPaymentBody, CashReceiptBody, HistoryQuery, QrPaymentBody};
use crate::application::gateway::GatewayMode;
use crate::domain::history::HistoryPage;
use crate::domain::payment::PaymentResult;
use crate::interfaces::csv::history_writer::HistoryWriter;
use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

const EXPORT_FILENAME: &str = "payment-history.csv";

pub async fn health(State(gateway): State<SharedGateway>) -> Json<Value> {
    let mode = match gateway.mode() {
        GatewayMode::Simulation => "simulation",
        GatewayMode::Live => "live",
    };
    Json(json!({ "status": "ok", "mode": mode }))
}

pub async fn card_payment(
    State(gateway): State<SharedGateway>,
    payload: Result<Json<CardPaymentBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    let request = body.into_request()?;
    let result = gateway.card_payment(request).await?;
    Ok(payment_response(result))
}

pub async fn cancel_payment(
    State(gateway): State<SharedGateway>,
    payload: Result<Json<CancelBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    let request = body.into_request()?;
    let result = gateway.cancel(request).await?;
    Ok(payment_response(result))
}

pub async fn qr_payment(
    State(gateway): State<SharedGateway>,
    payload: Result<Json<QrPaymentBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    let request = body.into_request()?;
    let result = gateway.qr_payment(request).await?;
    Ok(payment_response(result))
}

pub async fn cash_receipt(
    State(gateway): State<SharedGateway>,
    payload: Result<Json<CashReceiptBody>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    let request = body.into_request()?;
    let result = gateway.issue_cash_receipt(request).await?;
    Ok(payment_response(result))
}

pub async fn history(
    State(gateway): State<SharedGateway>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Json<HistoryPage>, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let page = gateway.history(&filter).await?;
    Ok(Json(page))
}

/// Streams every matching transaction as a CSV attachment.
pub async fn export_history(
    State(gateway): State<SharedGateway>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    let items = gateway.export_history(&filter).await?;

    let mut writer = HistoryWriter::new(Vec::new());
    writer.write_items(&items)?;
    let body = writer.into_inner()?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILENAME),
            ),
        ],
        body,
    )
        .into_response())
}

/// Unsuccessful results are still well-formed answers; they go out as 400.
fn payment_response(result: PaymentResult) -> Response {
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(result)).into_response()
}
