use crate::domain::history::HistoryItem;
use crate::error::{PaymentError, Result};
use serde::Serialize;
use std::io::Write;

/// One exported history line; timestamps are RFC 3339, absent values empty.
#[derive(Serialize)]
struct HistoryCsvRow<'a> {
    transaction_id: &'a str,
    approval_number: &'a str,
    amount: u64,
    method: &'static str,
    status: &'static str,
    order_name: &'a str,
    customer_name: &'a str,
    created_at: String,
    cancelled_at: String,
}

impl<'a> From<&'a HistoryItem> for HistoryCsvRow<'a> {
    fn from(item: &'a HistoryItem) -> Self {
        HistoryCsvRow {
            transaction_id: item.transaction_id.as_str(),
            approval_number: item.approval_number.as_str(),
            amount: item.amount,
            method: item.method.as_str(),
            status: item.status.as_str(),
            order_name: &item.order_name,
            customer_name: item.customer_name.as_deref().unwrap_or_default(),
            created_at: item.created_at.to_rfc3339(),
            cancelled_at: item
                .cancelled_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

/// Writes history items as CSV with a single header row.
pub struct HistoryWriter<W: Write> {
    writer: csv::Writer<W>,
    header_written: bool,
}

impl<W: Write> HistoryWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        Self {
            writer,
            header_written: false,
        }
    }

    pub fn write_items(&mut self, items: &[HistoryItem]) -> Result<()> {
        if !self.header_written {
            self.writer.write_record(HEADER)?;
            self.header_written = true;
        }
        for item in items {
            self.writer.serialize(HistoryCsvRow::from(item))?;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Flushes and returns the underlying sink.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| PaymentError::IoError(e.into_error()))
    }
}

const HEADER: [&str; 9] = [
    "transaction_id",
    "approval_number",
    "amount",
    "method",
    "status",
    "order_name",
    "customer_name",
    "created_at",
    "cancelled_at",
];
