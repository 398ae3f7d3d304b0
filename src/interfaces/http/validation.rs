//! Request bodies as they arrive over HTTP and the checks that turn them into
//! gateway requests.
//!
//! Every field is optional at the serde level so that a missing field is
//! reported with its own error code instead of a generic parse failure.

use super::error::ApiError;
use crate::domain::history::HistoryFilter;
use crate::domain::payment::{
    CancelRequest, CardPaymentRequest, CashReceiptRequest, QrPaymentRequest,
};
use crate::domain::transaction::{
    Amount, CardNumber, PaymentMethod, PaymentStatus, QrType, ReceiptType, TransactionId,
};
use chrono::NaiveDate;
use serde::de::{self, IntoDeserializer, value::StringDeserializer};
use serde::{Deserialize, Deserializer};
use serde_json::Number;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPaymentBody {
    pub amount: Option<Number>,
    pub card_number: Option<CardNumber>,
    pub expiry_month: Option<String>,
    pub expiry_year: Option<String>,
    pub installment: Option<u8>,
    pub order_name: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelBody {
    pub transaction_id: Option<String>,
    pub cancel_reason: Option<String>,
    pub cancel_amount: Option<Number>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrPaymentBody {
    pub amount: Option<Number>,
    pub qr_type: Option<QrType>,
    pub order_name: Option<String>,
    pub customer_phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashReceiptBody {
    pub amount: Option<Number>,
    pub receipt_type: Option<ReceiptType>,
    pub phone_number: Option<String>,
    pub registration_number: Option<String>,
    pub order_name: Option<String>,
}

/// Query parameters of the history routes. A blank value (`?method=`) counts
/// as absent; a non-blank value that does not parse is still rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(default, deserialize_with = "parsed_unless_blank")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "parsed_unless_blank")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "variant_unless_blank")]
    pub method: Option<PaymentMethod>,
    #[serde(default, deserialize_with = "variant_unless_blank")]
    pub status: Option<PaymentStatus>,
    #[serde(default, deserialize_with = "parsed_unless_blank")]
    pub page: Option<u32>,
    #[serde(default, deserialize_with = "parsed_unless_blank")]
    pub limit: Option<u32>,
}

impl CardPaymentBody {
    pub fn into_request(self) -> Result<CardPaymentRequest, ApiError> {
        let amount = positive_amount(self.amount)?;
        let (Some(card_number), Some(expiry_month), Some(expiry_year)) = (
            self.card_number.filter(|card| !card.is_empty()),
            non_blank(self.expiry_month),
            non_blank(self.expiry_year),
        ) else {
            return Err(ApiError::validation(
                "INVALID_CARD",
                "card number and expiry date are required",
            ));
        };
        let order_name = order_name(self.order_name)?;

        Ok(CardPaymentRequest {
            amount,
            card_number,
            expiry_month,
            expiry_year,
            installment: self.installment.unwrap_or(0),
            order_name,
            customer_name: non_blank(self.customer_name),
            customer_phone: non_blank(self.customer_phone),
        })
    }
}

impl CancelBody {
    pub fn into_request(self) -> Result<CancelRequest, ApiError> {
        let transaction_id = non_blank(self.transaction_id).ok_or_else(|| {
            ApiError::validation("INVALID_TRANSACTION", "transactionId is required")
        })?;
        let cancel_reason = non_blank(self.cancel_reason)
            .ok_or_else(|| ApiError::validation("INVALID_REASON", "cancelReason is required"))?;
        let cancel_amount = match self.cancel_amount {
            Some(amount) => Some(positive_amount(Some(amount))?),
            None => None,
        };

        Ok(CancelRequest {
            transaction_id: TransactionId::new(transaction_id),
            cancel_reason,
            cancel_amount,
        })
    }
}

impl QrPaymentBody {
    pub fn into_request(self) -> Result<QrPaymentRequest, ApiError> {
        let amount = positive_amount(self.amount)?;
        let qr_type = self
            .qr_type
            .ok_or_else(|| ApiError::validation("INVALID_QR_TYPE", "qrType is required"))?;
        let order_name = order_name(self.order_name)?;

        Ok(QrPaymentRequest {
            amount,
            qr_type,
            order_name,
            customer_phone: non_blank(self.customer_phone),
        })
    }
}

impl CashReceiptBody {
    pub fn into_request(self) -> Result<CashReceiptRequest, ApiError> {
        let amount = positive_amount(self.amount)?;
        let receipt_type = self
            .receipt_type
            .ok_or_else(|| ApiError::validation("INVALID_TYPE", "receiptType is required"))?;
        let phone_number = non_blank(self.phone_number);
        let registration_number = non_blank(self.registration_number);
        if phone_number.is_none() && registration_number.is_none() {
            return Err(ApiError::validation(
                "INVALID_IDENTIFIER",
                "phoneNumber or registrationNumber is required",
            ));
        }
        let order_name = order_name(self.order_name)?;

        Ok(CashReceiptRequest {
            amount,
            receipt_type,
            phone_number,
            registration_number,
            order_name,
        })
    }
}

impl HistoryQuery {
    pub fn into_filter(self) -> Result<HistoryFilter, ApiError> {
        if self.page == Some(0) || self.limit == Some(0) {
            return Err(ApiError::validation(
                "INVALID_PAGE",
                "page and limit must be at least 1",
            ));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date)
            && start > end
        {
            return Err(ApiError::validation(
                "INVALID_DATE_RANGE",
                "startDate must not be after endDate",
            ));
        }

        Ok(HistoryFilter {
            method: self.method,
            status: self.status,
            start_date: self.start_date,
            end_date: self.end_date,
            page: self.page,
            limit: self.limit,
        })
    }
}

fn positive_amount(amount: Option<Number>) -> Result<Amount, ApiError> {
    amount
        .as_ref()
        .and_then(whole_number)
        .and_then(|value| Amount::try_from(value).ok())
        .ok_or_else(|| ApiError::validation("INVALID_AMOUNT", "amount must be a positive integer"))
}

/// Accepts integral numbers written with a zero fraction, such as `10000.0`.
fn whole_number(number: &Number) -> Option<u64> {
    if let Some(value) = number.as_u64() {
        return Some(value);
    }
    number
        .as_f64()
        .filter(|value| value.fract() == 0.0 && *value >= 0.0 && *value <= u64::MAX as f64)
        .map(|value| value as u64)
}

fn unless_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

fn parsed_unless_blank<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    unless_blank(deserializer)?
        .map(|value| value.parse().map_err(de::Error::custom))
        .transpose()
}

fn variant_unless_blank<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    unless_blank(deserializer)?
        .map(|value| {
            let variant: StringDeserializer<D::Error> = value.into_deserializer();
            T::deserialize(variant)
        })
        .transpose()
}

fn order_name(order_name: Option<String>) -> Result<String, ApiError> {
    non_blank(order_name).ok_or_else(|| ApiError::validation("INVALID_ORDER", "orderName is required"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
