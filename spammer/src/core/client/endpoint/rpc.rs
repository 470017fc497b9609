use alloy::network::{Ethereum, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::types::TransactionRequest;
use alloy::transports::{RpcError, TransportErrorKind};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::{Endpoint, EndpointError, ReceiptStatus, SubmitError};

/// [`Endpoint`] over a plain HTTP JSON-RPC connection.
pub struct RpcEndpoint {
    url: Url,
    provider: RootProvider<Ethereum>,
}

impl RpcEndpoint {
    pub fn new(url: Url) -> Self {
        Self { provider: RootProvider::new_http(url.clone()), url }
    }

    /// Creates the endpoint and probes it with `eth_chainId`.
    pub async fn connect(url: Url) -> Result<Self, EndpointError> {
        let endpoint = Self::new(url);
        let chain_id = endpoint
            .chain_id()
            .await
            .map_err(|e| EndpointError::Connect { url: endpoint.url.to_string(), message: e.to_string() })?;
        debug!(endpoint = %endpoint.url, chain_id, "Connected to endpoint");
        Ok(endpoint)
    }

    /// Reads a receipt as untyped JSON, for nodes whose receipts alloy cannot decode.
    async fn raw_receipt(&self, tx_hash: TxHash) -> Result<ReceiptStatus, EndpointError> {
        let raw: Option<Value> =
            self.provider.raw_request("eth_getTransactionReceipt".into(), (tx_hash,)).await.map_err(transport_error)?;
        Ok(receipt_status_from_json(raw.as_ref()))
    }
}

fn transport_error(err: RpcError<TransportErrorKind>) -> EndpointError {
    match err {
        RpcError::DeserError { err, text } => EndpointError::Decode(format!("{err}: {text}")),
        other => EndpointError::Transport(other.to_string()),
    }
}

/// Maps a raw `eth_getTransactionReceipt` result to a [`ReceiptStatus`].
///
/// A receipt object with a non-null `blockNumber` counts as included. A missing `status`
/// field (pre-Byzantium receipts) counts as success.
pub(crate) fn receipt_status_from_json(receipt: Option<&Value>) -> ReceiptStatus {
    let Some(receipt) = receipt.and_then(Value::as_object) else {
        return ReceiptStatus::NotFound;
    };
    let block_number = match receipt.get("blockNumber") {
        None | Some(Value::Null) => return ReceiptStatus::NotFound,
        Some(value) => quantity(value),
    };
    let success = receipt.get("status").and_then(quantity).map_or(true, |status| status == 1);
    ReceiptStatus::Included { block_number, success }
}

/// Reads a JSON-RPC quantity that may be encoded as a hex string, a decimal string or a number.
fn quantity(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(s) => match s.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16).ok(),
            None => s.parse().ok(),
        },
        _ => None,
    }
}

#[async_trait]
impl Endpoint for RpcEndpoint {
    fn url(&self) -> String {
        self.url.to_string()
    }

    async fn chain_id(&self) -> Result<u64, EndpointError> {
        self.provider.get_chain_id().await.map_err(transport_error)
    }

    async fn pending_nonce(&self, account: Address) -> Result<u64, EndpointError> {
        self.provider.get_transaction_count(account).pending().await.map_err(transport_error)
    }

    async fn gas_price(&self) -> Result<u128, EndpointError> {
        self.provider.get_gas_price().await.map_err(transport_error)
    }

    async fn estimate_transfer_gas(&self, from: Address, to: Address, value: U256) -> Result<u64, EndpointError> {
        let request = TransactionRequest::default().with_from(from).with_to(to).with_value(value);
        self.provider.estimate_gas(request).await.map_err(transport_error)
    }

    async fn balance(&self, account: Address) -> Result<U256, EndpointError> {
        self.provider.get_balance(account).await.map_err(transport_error)
    }

    async fn submit(&self, raw: Bytes) -> Result<(), SubmitError> {
        match self.provider.send_raw_transaction(&raw).await {
            Ok(pending) => {
                debug!(endpoint = %self.url, tx_hash = %pending.tx_hash(), "Transaction accepted by endpoint");
                Ok(())
            }
            Err(e) => Err(SubmitError::classify(e.to_string())),
        }
    }

    async fn receipt(&self, tx_hash: TxHash) -> Result<ReceiptStatus, EndpointError> {
        match self.provider.get_transaction_receipt(tx_hash).await {
            Ok(Some(receipt)) => {
                Ok(ReceiptStatus::Included { block_number: receipt.block_number, success: receipt.status() })
            }
            Ok(None) => Ok(ReceiptStatus::NotFound),
            Err(RpcError::DeserError { err, .. }) => {
                warn!(
                    endpoint = %self.url,
                    %tx_hash,
                    error = %err,
                    "Typed receipt decoding failed, reading raw receipt"
                );
                self.raw_receipt(tx_hash).await
            }
            Err(e) => Err(transport_error(e)),
        }
    }
}
