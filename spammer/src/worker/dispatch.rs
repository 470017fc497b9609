//! Per-account dispatch loop.
//!
//! Each loop owns one [`WorkerAccount`] and is the only writer of its nonce. A cycle prepares a
//! blob transaction at the local nonce, submits it to the assigned endpoint and reacts to the
//! result:
//!
//! ```text
//! Preparing -> Submitting -> Succeeded        -> nonce + 1, optional pacing sleep
//!                         -> NonceConflict    -> adopt the endpoint's pending nonce
//!                         -> TransientFailure -> keep the nonce, back off
//! ```
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::TxHash;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};

use crate::core::accounts::WorkerAccount;
use crate::core::assembler::{BlobTxTemplate, SignedTx};
use crate::core::client::{EndpointHandle, SubmitError};
use crate::core::fee::FeeResolver;
use crate::core::payload::PayloadSource;
use crate::error::SpammerResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchPacing {
    /// Sleep after an accepted submission. Zero disables it.
    pub success_sleep: Duration,
    /// Sleep after a failed attempt before retrying at the same nonce.
    pub failure_backoff: Duration,
}

/// Result of one dispatch cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent { nonce: u64, tx_hash: TxHash },
    NonceResynced { stale: u64, adopted: u64 },
    Retrying { nonce: u64, reason: String },
}

enum DispatchState {
    Preparing,
    Submitting(SignedTx),
    Succeeded(SignedTx),
    NonceConflict { reason: String },
    TransientFailure { reason: String },
    Done(DispatchOutcome),
}

pub struct DispatchLoop {
    account: WorkerAccount,
    endpoint: EndpointHandle,
    template: Arc<BlobTxTemplate>,
    fees: FeeResolver,
    payload: PayloadSource,
    pacing: DispatchPacing,
}

impl DispatchLoop {
    pub fn new(
        account: WorkerAccount,
        endpoint: EndpointHandle,
        template: Arc<BlobTxTemplate>,
        fees: FeeResolver,
        payload: PayloadSource,
        pacing: DispatchPacing,
    ) -> Self {
        Self { account, endpoint, template, fees, payload, pacing }
    }

    pub fn account(&self) -> &WorkerAccount {
        &self.account
    }

    /// Loads the account's pending nonce from the endpoint. On failure the local nonce is kept
    /// and the first submission sorts it out through a nonce conflict.
    pub async fn sync_nonce(&mut self) {
        match self.endpoint.pending_nonce(self.account.address()).await {
            Ok(nonce) => self.account.resync(nonce),
            Err(e) => warn!(error = %e, nonce = self.account.next_nonce(), "Failed to load pending nonce"),
        }
    }

    /// Runs exactly one cycle, including its pacing or backoff sleep.
    pub async fn step(&mut self) -> DispatchOutcome {
        let mut state = DispatchState::Preparing;
        loop {
            state = match state {
                DispatchState::Preparing => match self.prepare().await {
                    Ok(tx) => DispatchState::Submitting(tx),
                    Err(e) => DispatchState::TransientFailure { reason: e.to_string() },
                },
                DispatchState::Submitting(tx) => match self.endpoint.submit(tx.raw.clone()).await {
                    Ok(()) => DispatchState::Succeeded(tx),
                    Err(SubmitError::NonceConflict(reason)) => DispatchState::NonceConflict { reason },
                    Err(SubmitError::Transient(reason)) => DispatchState::TransientFailure { reason },
                },
                DispatchState::Succeeded(tx) => {
                    info!(nonce = tx.nonce, tx_hash = %tx.tx_hash, "Blob transaction sent");
                    self.account.advance();
                    if !self.pacing.success_sleep.is_zero() {
                        tokio::time::sleep(self.pacing.success_sleep).await;
                    }
                    DispatchState::Done(DispatchOutcome::Sent { nonce: tx.nonce, tx_hash: tx.tx_hash })
                }
                DispatchState::NonceConflict { reason } => self.resync(reason).await,
                DispatchState::TransientFailure { reason } => {
                    let nonce = self.account.next_nonce();
                    let backoff = self.pacing.failure_backoff;
                    warn!(nonce, error = %reason, ?backoff, "Blob transaction failed, retrying");
                    tokio::time::sleep(self.pacing.failure_backoff).await;
                    DispatchState::Done(DispatchOutcome::Retrying { nonce, reason })
                }
                DispatchState::Done(outcome) => return outcome,
            };
        }
    }

    /// Syncs the nonce, then cycles until `shutdown` is cancelled.
    pub async fn run(mut self, shutdown: CancellationToken) {
        let span = tracing::info_span!("dispatch", worker = self.account.index, account = %self.account.address());
        async move {
            self.sync_nonce().await;
            info!(nonce = self.account.next_nonce(), endpoint = %self.endpoint.url(), "Dispatch loop started");
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    _ = self.step() => {}
                }
            }
            info!(nonce = self.account.next_nonce(), "Dispatch loop stopped");
        }
        .instrument(span)
        .await
    }

    async fn prepare(&self) -> SpammerResult<SignedTx> {
        let fees = self.fees.resolve(self.endpoint.as_ref()).await?;
        let payload = self.payload.next().await?;
        let tx = self.template.sign(self.account.next_nonce(), &fees, &payload, self.account.signer()).await?;
        debug!(nonce = tx.nonce, tx_hash = %tx.tx_hash, blobs = payload.blobs.len(), "Prepared blob transaction");
        Ok(tx)
    }

    async fn resync(&mut self, reason: String) -> DispatchState {
        let stale = self.account.next_nonce();
        match self.endpoint.pending_nonce(self.account.address()).await {
            Ok(adopted) => {
                info!(stale, adopted, error = %reason, "Nonce conflict, adopted pending nonce");
                self.account.resync(adopted);
                DispatchState::Done(DispatchOutcome::NonceResynced { stale, adopted })
            }
            Err(e) => DispatchState::TransientFailure { reason: format!("{reason}; nonce refresh failed: {e}") },
        }
    }
}
