use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::core::assembler::{SignedTx, TransferTemplate};
use crate::core::client::{Endpoint, RpcEndpoint};
use crate::error::SpammerResult;
use crate::types::params::{BatchTransferSettings, TransferSettings};
use crate::worker::confirmation::ConfirmationWaiter;

use super::until_cancelled;

/// Signs and submits one transfer at `nonce`, priced and sized by the endpoint.
pub async fn send_transfer(
    endpoint: &dyn Endpoint,
    settings: &TransferSettings,
    nonce: u64,
) -> SpammerResult<SignedTx> {
    let from = settings.signer.address();
    let gas_price = endpoint.gas_price().await?;
    let gas_limit = endpoint.estimate_transfer_gas(from, settings.to, settings.value).await?;

    let template = TransferTemplate { chain_id: settings.chain_id };
    let tx = template.sign(settings.to, settings.value, nonce, gas_price, gas_limit, &settings.signer).await?;
    endpoint.submit(tx.raw.clone()).await?;
    info!(
        nonce,
        tx_hash = %tx.tx_hash,
        to = %settings.to,
        value = %settings.value,
        gas_price,
        gas_limit,
        "Transfer sent"
    );
    Ok(tx)
}

async fn start_nonce(endpoint: &dyn Endpoint, settings: &TransferSettings) -> SpammerResult<u64> {
    match settings.nonce {
        Some(nonce) => Ok(nonce),
        None => Ok(endpoint.pending_nonce(settings.signer.address()).await?),
    }
}

pub async fn run_transfer(settings: TransferSettings, shutdown: CancellationToken) -> SpammerResult<()> {
    let endpoint = RpcEndpoint::connect(settings.rpc_url.clone()).await?;
    let from = settings.signer.address();
    let balance = endpoint.balance(from).await?;
    info!(account = %from, %balance, "Sender balance");

    let nonce = start_nonce(&endpoint, &settings).await?;
    let tx = send_transfer(&endpoint, &settings, nonce).await?;

    match until_cancelled(&shutdown, ConfirmationWaiter::default().wait(&endpoint, tx.tx_hash)).await {
        Some(confirmation) => info!(
            nonce,
            tx_hash = %tx.tx_hash,
            block_number = ?confirmation.block_number,
            success = confirmation.success,
            "Transfer included"
        ),
        None => warn!(tx_hash = %tx.tx_hash, "Stopped before the transfer was included"),
    }
    Ok(())
}

/// Sends transfers at consecutive nonces, pausing whenever the next nonce is a multiple of
/// `delta_nonce`.
pub struct TransferLoop<'a> {
    endpoint: &'a dyn Endpoint,
    settings: &'a BatchTransferSettings,
    nonce: u64,
    retry_delay: Duration,
}

impl<'a> TransferLoop<'a> {
    pub fn new(endpoint: &'a dyn Endpoint, settings: &'a BatchTransferSettings, nonce: u64) -> Self {
        Self { endpoint, settings, nonce, retry_delay: Duration::from_secs(1) }
    }

    pub fn next_nonce(&self) -> u64 {
        self.nonce
    }

    /// Sends one transfer. A failed attempt is logged, the nonce is reloaded from the endpoint
    /// and the attempt is retried on the next step.
    pub async fn step(&mut self) -> Option<SignedTx> {
        let sender = self.settings.transfer.signer.address();
        match self.endpoint.balance(sender).await {
            Ok(balance) => info!(account = %sender, %balance, "Sender balance"),
            Err(e) => warn!(account = %sender, error = %e, "Failed to read sender balance"),
        }

        match send_transfer(self.endpoint, &self.settings.transfer, self.nonce).await {
            Ok(tx) => {
                self.nonce += 1;
                if self.nonce % self.settings.delta_nonce == 0 {
                    info!(
                        nonce = self.nonce,
                        delta_nonce = self.settings.delta_nonce,
                        sleep = ?self.settings.delta_sleep,
                        "Pausing transfers"
                    );
                    tokio::time::sleep(self.settings.delta_sleep).await;
                }
                Some(tx)
            }
            Err(e) => {
                warn!(nonce = self.nonce, error = %e, "Transfer failed, retrying");
                tokio::time::sleep(self.retry_delay).await;
                match self.endpoint.pending_nonce(sender).await {
                    Ok(nonce) => self.nonce = nonce,
                    Err(e) => warn!(error = %e, "Failed to reload pending nonce"),
                }
                None
            }
        }
    }
}

pub async fn run_batch_transfer(settings: BatchTransferSettings, shutdown: CancellationToken) -> SpammerResult<()> {
    let endpoint = RpcEndpoint::connect(settings.transfer.rpc_url.clone()).await?;
    let nonce = start_nonce(&endpoint, &settings.transfer).await?;
    let mut transfers = TransferLoop::new(&endpoint, &settings, nonce);

    while until_cancelled(&shutdown, transfers.step()).await.is_some() {}
    info!(nonce = transfers.next_nonce(), "Batch transfer stopped");
    Ok(())
}
