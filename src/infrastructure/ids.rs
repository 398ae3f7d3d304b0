use crate::domain::ports::IdGenerator;
use crate::domain::transaction::{ApprovalNumber, TransactionId};
use rand::Rng;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

const TRANSACTION_PREFIX: &str = "TXN";
const SUFFIX_LEN: usize = 4;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Counter-based transaction ids: `TXN` + 10-digit sequence + random base36 suffix.
///
/// Uniqueness comes from the counter alone; the suffix only makes ids harder
/// to guess. Two generators may produce overlapping sequences, so a process
/// should share one generator per store.
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn transaction_id(&self) -> TransactionId {
        let sequence = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
            .collect();
        TransactionId::new(format!("{}{:010}{}", TRANSACTION_PREFIX, sequence, suffix))
    }

    fn approval_number(&self) -> ApprovalNumber {
        random_approval_number()
    }
}

/// Random UUID v4 transaction ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn transaction_id(&self) -> TransactionId {
        TransactionId::new(format!(
            "{}{}",
            TRANSACTION_PREFIX,
            Uuid::new_v4().simple()
        ))
    }

    fn approval_number(&self) -> ApprovalNumber {
        random_approval_number()
    }
}

/// Eight random decimal digits.
fn random_approval_number() -> ApprovalNumber {
    let value: u32 = rand::thread_rng().gen_range(0..100_000_000);
    ApprovalNumber::new(format!("{:08}", value))
}
