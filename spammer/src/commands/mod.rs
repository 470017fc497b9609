use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::cli::Commands;
use crate::error::SpammerResult;
use crate::types::params::{BatchTransferSettings, ProofSettings, StressSettings, TransferSettings, TxSettings};

pub mod proof;
pub mod stress;
pub mod transfer;
pub mod tx;

/// Validates the command's flags and runs it until it finishes or `shutdown` fires.
pub async fn run(command: Commands, shutdown: CancellationToken) -> SpammerResult<()> {
    match command {
        Commands::Tx { tx_command } => tx::run_tx(TxSettings::try_from(tx_command.as_ref())?, shutdown).await,
        Commands::Stress { stress_command } => {
            stress::run_stress(StressSettings::try_from(stress_command.as_ref())?, shutdown).await
        }
        Commands::Transfer { transfer_command } => {
            transfer::run_transfer(TransferSettings::try_from(transfer_command.as_ref())?, shutdown).await
        }
        Commands::BatchTransfer { batch_transfer_command } => {
            let settings = BatchTransferSettings::try_from(batch_transfer_command.as_ref())?;
            transfer::run_batch_transfer(settings, shutdown).await
        }
        Commands::Proof { proof_command } => proof::run_proof(ProofSettings::try_from(proof_command.as_ref())?).await,
    }
}

/// Runs `fut` unless `shutdown` fires first.
pub(crate) async fn until_cancelled<F: Future>(shutdown: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        _ = shutdown.cancelled() => None,
        output = fut => Some(output),
    }
}
