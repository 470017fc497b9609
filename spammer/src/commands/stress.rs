use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::blob::PayloadMode;
use crate::core::accounts::AccountFactory;
use crate::core::payload::PayloadSource;
use crate::core::pool::EndpointPool;
use crate::error::SpammerResult;
use crate::types::params::StressSettings;
use crate::worker::controller::DispatchController;
use crate::worker::dispatch::DispatchLoop;
use crate::worker::funding::FundingDistributor;

use super::until_cancelled;

/// Funds fresh worker accounts, then keeps one dispatch loop per worker running until shutdown.
pub async fn run_stress(settings: StressSettings, shutdown: CancellationToken) -> SpammerResult<()> {
    let pool = EndpointPool::connect(&settings.rpc_urls).await?;
    let primary = pool.primary();

    let payload = match settings.payload_mode {
        PayloadMode::Fixed => PayloadSource::fixed_random(settings.payload).await?,
        PayloadMode::Random => PayloadSource::Random(settings.payload),
    };
    info!(
        workers = settings.workers,
        endpoints = pool.len(),
        blobs_per_tx = settings.payload.blob_count,
        blob_size = settings.payload.blob_size,
        proof_kind = ?settings.payload.proof_kind,
        payload_mode = ?settings.payload_mode,
        "Starting stress run"
    );

    let accounts = AccountFactory::generate(settings.workers);
    let funding_gas_price = settings.fees.legacy_gas_price(primary.as_ref()).await?;
    let distributor = FundingDistributor::new(Arc::clone(&primary), settings.template.chain_id);
    let funding = distributor.distribute(
        &settings.master,
        &accounts,
        settings.funding_amount,
        funding_gas_price,
        settings.fees.gas_limit,
    );
    if until_cancelled(&shutdown, funding).await.transpose()?.is_none() {
        warn!("Stopped while funding worker accounts");
        return Ok(());
    }

    let template = Arc::new(settings.template);
    let fees = settings.fees.resolver();
    let loops = accounts
        .into_iter()
        .map(|account| {
            let endpoint = pool.assign(account.index);
            DispatchLoop::new(account, endpoint, Arc::clone(&template), fees.clone(), payload.clone(), settings.pacing)
        })
        .collect();

    let mut controller = DispatchController::new(settings.launch_stagger, shutdown.clone());
    controller.launch(loops).await;
    shutdown.cancelled().await;
    controller.shutdown().await;
    Ok(())
}
