use crate::domain::transaction::TransactionId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Duplicate transaction id: {0}")]
    DuplicateTransaction(TransactionId),
    #[error("Unknown transaction id: {0}")]
    UnknownTransaction(TransactionId),
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
