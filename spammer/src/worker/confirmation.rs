use std::time::Duration;

use alloy::primitives::TxHash;
use tracing::{debug, warn};

use crate::core::client::{Endpoint, ReceiptStatus};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub success: bool,
}

/// Polls an endpoint until a transaction has a receipt.
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationWaiter {
    poll_interval: Duration,
}

impl Default for ConfirmationWaiter {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl ConfirmationWaiter {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns once the transaction is included. Never gives up; query errors are logged and retried.
    pub async fn wait(&self, endpoint: &dyn Endpoint, tx_hash: TxHash) -> Confirmation {
        loop {
            if let Some(confirmation) = self.check(endpoint, tx_hash).await {
                return confirmation;
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One receipt query. `None` while the transaction is pending or the query failed.
    pub async fn check(&self, endpoint: &dyn Endpoint, tx_hash: TxHash) -> Option<Confirmation> {
        match endpoint.receipt(tx_hash).await {
            Ok(ReceiptStatus::Included { block_number, success }) => {
                debug!(%tx_hash, ?block_number, success, "Transaction included");
                Some(Confirmation { tx_hash, block_number, success })
            }
            Ok(ReceiptStatus::NotFound) => None,
            Err(e) => {
                warn!(%tx_hash, error = %e, "Failed to query transaction receipt");
                None
            }
        }
    }
}
