use alloy::primitives::{Address, TxHash};
use chrono::{DateTime, Utc};

use crate::core::assembler::SignedTx;

/// A submitted transaction whose inclusion has not been confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTransaction {
    pub tx_hash: TxHash,
    pub account: Address,
    pub nonce: u64,
    pub submitted_at: DateTime<Utc>,
}

impl PendingTransaction {
    pub fn submitted(tx: &SignedTx, account: Address) -> Self {
        Self { tx_hash: tx.tx_hash, account, nonce: tx.nonce, submitted_at: Utc::now() }
    }
}
