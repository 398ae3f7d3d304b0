use crate::error::PaymentError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A positive payment amount in whole currency units.
///
/// The wrapper guarantees that a stored transaction never carries a zero amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    pub fn new(value: u64) -> Result<Self, PaymentError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(PaymentError::ValidationError(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for Amount {
    type Error = PaymentError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = u64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

/// Primary key of a stored transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApprovalNumber(String);

impl ApprovalNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApprovalNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Minimum number of characters for a card number to pass screening.
pub const MIN_CARD_NUMBER_LEN: usize = 15;

/// A card number as typed by the customer.
///
/// `Debug` and `Display` only ever print the masked form.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct CardNumber(String);

impl CardNumber {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Length in characters, separators included.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keeps the first and last four characters of numbers with 12 or more
    /// characters; shorter inputs are hidden entirely.
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() < 12 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}{}", head, "*".repeat(chars.len() - 8), tail)
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CardNumber").field(&self.masked()).finish()
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
pub enum PaymentMethod {
    #[serde(rename = "CARD")]
    Card,
    #[serde(rename = "QR")]
    Qr,
    #[serde(rename = "CASH", alias = "CASH_RECEIPT")]
    CashReceipt,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "CARD",
            PaymentMethod::Qr => "QR",
            PaymentMethod::CashReceipt => "CASH",
        }
    }
}

/// Lifecycle status of a payment.
///
/// Only `Approved` and `Cancelled` are ever stored. `Failed` is returned to the
/// caller for rejected submissions and `Pending` is reserved for an
/// asynchronous confirmation flow the simulation does not have.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentStatus {
    Pending,
    Approved,
    Cancelled,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Approved => "APPROVED",
            PaymentStatus::Cancelled => "CANCELLED",
            PaymentStatus::Failed => "FAILED",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QrType {
    ZeroPay,
    KakaoPay,
    NaverPay,
    SamsungPay,
}

impl QrType {
    /// Provider name shown to the customer.
    pub fn display_name(&self) -> &'static str {
        match self {
            QrType::ZeroPay => "ZeroPay",
            QrType::KakaoPay => "KakaoPay",
            QrType::NaverPay => "NaverPay",
            QrType::SamsungPay => "SamsungPay",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReceiptType {
    Personal,
    Business,
}

/// Method-specific data recorded alongside a transaction.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum MethodDetails {
    Card {
        masked_card_number: String,
        installment: u8,
    },
    Qr {
        qr_type: QrType,
    },
    CashReceipt {
        receipt_type: ReceiptType,
    },
}

impl MethodDetails {
    pub fn method(&self) -> PaymentMethod {
        match self {
            MethodDetails::Card { .. } => PaymentMethod::Card,
            MethodDetails::Qr { .. } => PaymentMethod::Qr,
            MethodDetails::CashReceipt { .. } => PaymentMethod::CashReceipt,
        }
    }
}

/// Why a cancellation was refused.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CancelRejection {
    AlreadyCancelled,
    PartialAmount { requested: Amount, total: Amount },
}

impl CancelRejection {
    pub fn message(&self) -> &'static str {
        match self {
            CancelRejection::AlreadyCancelled => "transaction already cancelled",
            CancelRejection::PartialAmount { .. } => "partial cancellation is not supported",
        }
    }
}

/// A payment or receipt recorded by the gateway.
#[derive(Debug, PartialEq, Clone)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub approval_number: ApprovalNumber,
    pub amount: Amount,
    pub status: PaymentStatus,
    pub order_name: String,
    pub customer_name: Option<String>,
    pub details: MethodDetails,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub cancel_reason: Option<String>,
}

impl Transaction {
    /// Builds a freshly approved transaction.
    pub fn approved(
        transaction_id: TransactionId,
        approval_number: ApprovalNumber,
        amount: Amount,
        order_name: String,
        customer_name: Option<String>,
        details: MethodDetails,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            transaction_id,
            approval_number,
            amount,
            status: PaymentStatus::Approved,
            order_name,
            customer_name,
            details,
            created_at,
            cancelled_at: None,
            cancel_reason: None,
        }
    }

    pub fn method(&self) -> PaymentMethod {
        self.details.method()
    }

    /// Moves an approved transaction to `Cancelled`.
    ///
    /// Cancellation is always for the full amount; a requested amount that
    /// differs from it is refused and leaves the transaction untouched.
    pub fn cancel(
        &mut self,
        reason: String,
        requested: Option<Amount>,
        at: DateTime<Utc>,
    ) -> Result<(), CancelRejection> {
        if self.status == PaymentStatus::Cancelled {
            return Err(CancelRejection::AlreadyCancelled);
        }
        if let Some(requested) = requested
            && requested != self.amount
        {
            return Err(CancelRejection::PartialAmount {
                requested,
                total: self.amount,
            });
        }

        self.status = PaymentStatus::Cancelled;
        self.cancelled_at = Some(at);
        self.cancel_reason = Some(reason);
        Ok(())
    }
}
