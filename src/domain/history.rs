use super::transaction::{
    ApprovalNumber, PaymentMethod, PaymentStatus, Transaction, TransactionId,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Selection applied to the transaction history.
///
/// All criteria are optional and combined with AND. Date bounds are inclusive
/// and compared against the UTC calendar date of `created_at`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    pub method: Option<PaymentMethod>,
    pub status: Option<PaymentStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl HistoryFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        let created = tx.created_at.date_naive();
        self.method.is_none_or(|method| tx.method() == method)
            && self.status.is_none_or(|status| tx.status == status)
            && self.start_date.is_none_or(|start| created >= start)
            && self.end_date.is_none_or(|end| created <= end)
    }

    /// 1-based page number; zero is treated as the first page.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).max(1)
    }
}

/// Read-only projection of a transaction for history listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub transaction_id: TransactionId,
    pub approval_number: ApprovalNumber,
    pub amount: u64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub order_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl From<&Transaction> for HistoryItem {
    fn from(tx: &Transaction) -> Self {
        Self {
            transaction_id: tx.transaction_id.clone(),
            approval_number: tx.approval_number.clone(),
            amount: tx.amount.value(),
            method: tx.method(),
            status: tx.status,
            order_name: tx.order_name.clone(),
            customer_name: tx.customer_name.clone(),
            created_at: tx.created_at,
            cancelled_at: tx.cancelled_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPage {
    pub success: bool,
    pub items: Vec<HistoryItem>,
    /// Number of transactions matching the filter across all pages.
    pub total: usize,
    pub page: u32,
    pub limit: u32,
}

impl HistoryPage {
    /// Filters `transactions` (kept in their given order) and cuts out the
    /// requested page.
    pub fn select(transactions: &[Transaction], filter: &HistoryFilter) -> Self {
        let page = filter.page();
        let limit = filter.limit();

        let matching: Vec<&Transaction> =
            transactions.iter().filter(|tx| filter.matches(tx)).collect();
        let skip = (page as usize - 1).saturating_mul(limit as usize);

        let items = matching
            .iter()
            .skip(skip)
            .take(limit as usize)
            .map(|tx| HistoryItem::from(*tx))
            .collect();

        Self {
            success: true,
            items,
            total: matching.len(),
            page,
            limit,
        }
    }
}
