use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::core::client::{Endpoint, RpcEndpoint};
use crate::error::SpammerResult;
use crate::types::params::{TxPayload, TxSettings};
use crate::worker::confirmation::ConfirmationWaiter;

use super::until_cancelled;

pub async fn run_tx(settings: TxSettings, shutdown: CancellationToken) -> SpammerResult<()> {
    let endpoint = RpcEndpoint::connect(settings.rpc_url.clone()).await?;
    let account = settings.signer.address();

    let nonce = match settings.nonce {
        Some(nonce) => nonce,
        None => endpoint.pending_nonce(account).await?,
    };
    let fees = settings.fees.resolver().resolve(&endpoint).await?;

    if let TxPayload::File { path, data } = &settings.payload {
        info!(file = %path.display(), size = data.len(), "Loaded blob file");
    }
    let payload = settings.payload.into_bundle(settings.proof_kind).await?;
    let tx = settings.template.sign(nonce, &fees, &payload, &settings.signer).await?;
    info!(
        %account,
        nonce,
        blobs = payload.blobs.len(),
        versioned_hashes = ?payload.versioned_hashes(),
        max_fee_per_gas = fees.max_fee_per_gas,
        max_priority_fee_per_gas = fees.max_priority_fee_per_gas,
        max_fee_per_blob_gas = fees.max_fee_per_blob_gas,
        "Prepared blob transaction"
    );

    endpoint.submit(tx.raw.clone()).await?;
    info!(nonce, tx_hash = %tx.tx_hash, "Blob transaction sent");

    if !settings.wait_inclusion {
        return Ok(());
    }
    match until_cancelled(&shutdown, ConfirmationWaiter::default().wait(&endpoint, tx.tx_hash)).await {
        Some(confirmation) => info!(
            nonce,
            tx_hash = %tx.tx_hash,
            block_number = ?confirmation.block_number,
            success = confirmation.success,
            "Blob transaction included"
        ),
        None => warn!(tx_hash = %tx.tx_hash, "Stopped before the transaction was included"),
    }
    Ok(())
}
