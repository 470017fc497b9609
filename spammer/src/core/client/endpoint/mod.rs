pub mod error;
pub mod rpc;

use std::sync::Arc;

use alloy::primitives::{Address, Bytes, TxHash, U256};
use async_trait::async_trait;

pub use error::{EndpointError, SubmitError};
pub use rpc::RpcEndpoint;

/// What a node knows about a submitted transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    /// No receipt yet, the transaction is still pending.
    NotFound,
    Included { block_number: Option<u64>, success: bool },
}

/// The JSON-RPC surface of an execution node used by the spammer.
///
/// Implementations must be safe to share between dispatch loops.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Endpoint: Send + Sync {
    /// URL the endpoint talks to, for logs.
    fn url(&self) -> String;

    async fn chain_id(&self) -> Result<u64, EndpointError>;

    /// Next nonce of `account`, counting transactions still in the pool.
    async fn pending_nonce(&self, account: Address) -> Result<u64, EndpointError>;

    /// Suggested legacy gas price, in wei.
    async fn gas_price(&self) -> Result<u128, EndpointError>;

    async fn estimate_transfer_gas(&self, from: Address, to: Address, value: U256) -> Result<u64, EndpointError>;

    async fn balance(&self, account: Address) -> Result<U256, EndpointError>;

    /// Submits a network-encoded signed transaction.
    async fn submit(&self, raw: Bytes) -> Result<(), SubmitError>;

    async fn receipt(&self, tx_hash: TxHash) -> Result<ReceiptStatus, EndpointError>;
}

pub type EndpointHandle = Arc<dyn Endpoint>;
