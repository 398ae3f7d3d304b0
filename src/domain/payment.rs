use super::ports::Operation;
use super::transaction::{
    Amount, ApprovalNumber, CardNumber, MIN_CARD_NUMBER_LEN, MethodDetails, PaymentMethod,
    PaymentStatus, QrType, ReceiptType, Transaction, TransactionId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct CardPaymentRequest {
    pub amount: Amount,
    pub card_number: CardNumber,
    pub expiry_month: String,
    pub expiry_year: String,
    /// Number of monthly installments, 0 for a lump-sum payment.
    pub installment: u8,
    pub order_name: String,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct QrPaymentRequest {
    pub amount: Amount,
    pub qr_type: QrType,
    pub order_name: String,
    pub customer_phone: Option<String>,
}

/// Cash receipt issuance.
///
/// Callers must supply at least one of `phone_number` and
/// `registration_number`; the gateway records the receipt either way.
#[derive(Debug, Clone)]
pub struct CashReceiptRequest {
    pub amount: Amount,
    pub receipt_type: ReceiptType,
    pub phone_number: Option<String>,
    pub registration_number: Option<String>,
    pub order_name: String,
}

#[derive(Debug, Clone)]
pub struct CancelRequest {
    pub transaction_id: TransactionId,
    pub cancel_reason: String,
    pub cancel_amount: Option<Amount>,
}

/// A simulated business rule refused the submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub message: String,
}

impl Rejection {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What the gateway needs to know to create and store a payment of one kind.
pub trait PaymentIntent: Send + Sync {
    fn operation(&self) -> Operation;
    fn amount(&self) -> Amount;
    fn order_name(&self) -> &str;
    fn details(&self) -> MethodDetails;
    fn approval_message(&self) -> String;

    fn customer_name(&self) -> Option<&str> {
        None
    }

    /// Business screening run before anything is stored.
    fn screen(&self) -> Result<(), Rejection> {
        Ok(())
    }

    fn method(&self) -> PaymentMethod {
        self.details().method()
    }
}

impl PaymentIntent for CardPaymentRequest {
    fn operation(&self) -> Operation {
        Operation::CardPayment
    }

    fn amount(&self) -> Amount {
        self.amount
    }

    fn order_name(&self) -> &str {
        &self.order_name
    }

    fn details(&self) -> MethodDetails {
        MethodDetails::Card {
            masked_card_number: self.card_number.masked(),
            installment: self.installment,
        }
    }

    fn approval_message(&self) -> String {
        "payment approved".to_string()
    }

    fn customer_name(&self) -> Option<&str> {
        self.customer_name.as_deref()
    }

    fn screen(&self) -> Result<(), Rejection> {
        if self.card_number.len() < MIN_CARD_NUMBER_LEN {
            return Err(Rejection::new("invalid card number"));
        }
        Ok(())
    }

    fn method(&self) -> PaymentMethod {
        PaymentMethod::Card
    }
}

impl PaymentIntent for QrPaymentRequest {
    fn operation(&self) -> Operation {
        Operation::QrPayment
    }

    fn amount(&self) -> Amount {
        self.amount
    }

    fn order_name(&self) -> &str {
        &self.order_name
    }

    fn details(&self) -> MethodDetails {
        MethodDetails::Qr {
            qr_type: self.qr_type,
        }
    }

    fn approval_message(&self) -> String {
        format!("{} payment approved", self.qr_type.display_name())
    }
}

impl PaymentIntent for CashReceiptRequest {
    fn operation(&self) -> Operation {
        Operation::CashReceipt
    }

    fn amount(&self) -> Amount {
        self.amount
    }

    fn order_name(&self) -> &str {
        &self.order_name
    }

    fn details(&self) -> MethodDetails {
        MethodDetails::CashReceipt {
            receipt_type: self.receipt_type,
        }
    }

    fn approval_message(&self) -> String {
        "cash receipt issued".to_string()
    }
}

/// Outcome of a gateway operation as returned to the caller.
///
/// Business failures are ordinary results with `success == false`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    pub success: bool,
    pub transaction_id: TransactionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval_number: Option<ApprovalNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    pub amount: u64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
}

impl PaymentResult {
    pub fn approved(tx: &Transaction, message: String) -> Self {
        Self {
            success: true,
            transaction_id: tx.transaction_id.clone(),
            approval_number: Some(tx.approval_number.clone()),
            approved_at: Some(tx.created_at),
            amount: tx.amount.value(),
            method: tx.method(),
            status: PaymentStatus::Approved,
            message,
            receipt_url: Some(receipt_url(&tx.transaction_id)),
        }
    }

    pub fn failed(
        transaction_id: TransactionId,
        amount: u64,
        method: PaymentMethod,
        message: String,
    ) -> Self {
        Self {
            success: false,
            transaction_id,
            approval_number: None,
            approved_at: None,
            amount,
            method,
            status: PaymentStatus::Failed,
            message,
            receipt_url: None,
        }
    }

    pub fn not_found(transaction_id: TransactionId) -> Self {
        Self::failed(
            transaction_id,
            0,
            PaymentMethod::Card,
            "transaction not found".to_string(),
        )
    }

    /// A refused operation on an existing transaction; reports its current state.
    pub fn rejected(tx: &Transaction, message: String) -> Self {
        Self {
            success: false,
            transaction_id: tx.transaction_id.clone(),
            approval_number: None,
            approved_at: None,
            amount: tx.amount.value(),
            method: tx.method(),
            status: tx.status,
            message,
            receipt_url: None,
        }
    }

    pub fn cancelled(tx: &Transaction) -> Self {
        Self {
            success: true,
            transaction_id: tx.transaction_id.clone(),
            approval_number: None,
            approved_at: None,
            amount: tx.amount.value(),
            method: tx.method(),
            status: PaymentStatus::Cancelled,
            message: "payment cancelled".to_string(),
            receipt_url: None,
        }
    }
}

pub fn receipt_url(transaction_id: &TransactionId) -> String {
    format!("/receipt/{}", transaction_id)
}
