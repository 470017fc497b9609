use alloy::primitives::U256;
use alloy::signers::local::PrivateKeySigner;
use tracing::{info, warn};

use crate::core::accounts::WorkerAccount;
use crate::core::assembler::TransferTemplate;
use crate::core::client::EndpointHandle;
use crate::error::SpammerResult;
use crate::types::transaction::PendingTransaction;
use crate::worker::confirmation::ConfirmationWaiter;

/// Transfers starting balance from the master account to every worker.
pub struct FundingDistributor {
    endpoint: EndpointHandle,
    template: TransferTemplate,
    waiter: ConfirmationWaiter,
}

impl FundingDistributor {
    pub fn new(endpoint: EndpointHandle, chain_id: u64) -> Self {
        Self { endpoint, template: TransferTemplate { chain_id }, waiter: ConfirmationWaiter::default() }
    }

    pub fn with_waiter(mut self, waiter: ConfirmationWaiter) -> Self {
        self.waiter = waiter;
        self
    }

    /// Funds every worker and returns once all transfers are included.
    ///
    /// Transfers use consecutive master nonces in worker order. A rejected transfer fails the run.
    pub async fn distribute(
        &self,
        master: &PrivateKeySigner,
        workers: &[WorkerAccount],
        amount: U256,
        gas_price: u128,
        gas_limit: u64,
    ) -> SpammerResult<Vec<PendingTransaction>> {
        let start_nonce = self.endpoint.pending_nonce(master.address()).await?;
        info!(master = %master.address(), workers = workers.len(), start_nonce, %amount, "Funding worker accounts");

        let mut submitted = Vec::with_capacity(workers.len());
        for (offset, worker) in workers.iter().enumerate() {
            let nonce = start_nonce + offset as u64;
            let tx = self.template.sign(worker.address(), amount, nonce, gas_price, gas_limit, master).await?;
            self.endpoint.submit(tx.raw.clone()).await?;
            info!(
                worker = worker.index,
                account = %worker.address(),
                nonce,
                tx_hash = %tx.tx_hash,
                "Funding transfer sent"
            );
            submitted.push(PendingTransaction::submitted(&tx, worker.address()));
        }

        self.await_confirmations(&submitted).await;
        info!(workers = workers.len(), "All worker accounts funded");
        Ok(submitted)
    }

    /// Barrier over the funding transfers: polls every outstanding receipt until none is left.
    async fn await_confirmations(&self, submitted: &[PendingTransaction]) {
        let mut outstanding: Vec<&PendingTransaction> = submitted.iter().collect();
        loop {
            let mut still_pending = Vec::with_capacity(outstanding.len());
            for pending in outstanding {
                match self.waiter.check(self.endpoint.as_ref(), pending.tx_hash).await {
                    Some(confirmation) if !confirmation.success => {
                        warn!(account = %pending.account, tx_hash = %pending.tx_hash, "Funding transfer reverted");
                    }
                    Some(_) => {}
                    None => still_pending.push(pending),
                }
            }
            if still_pending.is_empty() {
                return;
            }
            info!(pending = still_pending.len(), "Waiting for funding transfers");
            outstanding = still_pending;
            tokio::time::sleep(self.waiter.poll_interval()).await;
        }
    }
}
