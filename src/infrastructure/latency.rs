use crate::domain::ports::{Latency, Operation};
use async_trait::async_trait;
use std::time::Duration;

/// Sleeps before each operation to mimic a round trip to a card network.
///
/// Base delays are scaled by `percent`; 100 keeps them as-is and 0 disables
/// them.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedLatency {
    percent: u32,
}

impl SimulatedLatency {
    pub fn new(percent: u32) -> Self {
        Self { percent }
    }

    pub fn base_delay(operation: Operation) -> Duration {
        let millis = match operation {
            Operation::CardPayment => 1500,
            Operation::QrPayment => 2000,
            Operation::CashReceipt => 1000,
            Operation::Cancel => 1500,
            Operation::History => 500,
        };
        Duration::from_millis(millis)
    }

    pub fn delay(&self, operation: Operation) -> Duration {
        Self::base_delay(operation) * self.percent / 100
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::new(100)
    }
}

#[async_trait]
impl Latency for SimulatedLatency {
    async fn wait(&self, operation: Operation) {
        let delay = self.delay(operation);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

/// Completes immediately.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLatency;

#[async_trait]
impl Latency for NoLatency {
    async fn wait(&self, _operation: Operation) {}
}
