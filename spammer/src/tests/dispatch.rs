use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use mockall::Sequence;
use rstest::*;
use tokio::time::Instant;

use crate::core::accounts::WorkerAccount;
use crate::core::assembler::BlobTxTemplate;
use crate::core::client::endpoint::MockEndpoint;
use crate::core::client::{EndpointError, SubmitError};
use crate::core::fee::FeeResolver;
use crate::core::payload::PayloadSource;
use crate::tests::common::*;
use crate::worker::dispatch::{DispatchLoop, DispatchOutcome, DispatchPacing};

fn dispatch_loop(
    endpoint: MockEndpoint,
    worker: WorkerAccount,
    template: Arc<BlobTxTemplate>,
    fees: FeeResolver,
    payload: PayloadSource,
    pacing: DispatchPacing,
) -> DispatchLoop {
    DispatchLoop::new(worker, Arc::new(endpoint), template, fees, payload, pacing)
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn nonce_advances_once_per_accepted_submission(
    worker: WorkerAccount,
    blob_template: Arc<BlobTxTemplate>,
    fixed_payload: PayloadSource,
    pacing: DispatchPacing,
) {
    let mut endpoint = MockEndpoint::new();
    endpoint.expect_pending_nonce().times(1).returning(|_| Ok(3));
    endpoint.expect_submit().times(5).returning(|_| Ok(()));

    let mut dispatch = dispatch_loop(endpoint, worker, blob_template, fixed_fees(), fixed_payload, pacing);
    dispatch.sync_nonce().await;

    let mut hashes = HashSet::new();
    for expected_nonce in 3..8 {
        let DispatchOutcome::Sent { nonce, tx_hash } = dispatch.step().await else {
            panic!("expected an accepted submission at nonce {expected_nonce}");
        };
        assert_eq!(nonce, expected_nonce);
        hashes.insert(tx_hash);
    }
    assert_eq!(dispatch.account().next_nonce(), 8);
    assert_eq!(hashes.len(), 5);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn nonce_conflict_adopts_endpoint_nonce(
    worker: WorkerAccount,
    blob_template: Arc<BlobTxTemplate>,
    fixed_payload: PayloadSource,
    pacing: DispatchPacing,
) {
    let mut seq = Sequence::new();
    let mut endpoint = MockEndpoint::new();
    endpoint
        .expect_submit()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(SubmitError::NonceConflict("nonce too low: next nonce 9, tx nonce 0".to_string())));
    endpoint.expect_pending_nonce().times(1).in_sequence(&mut seq).returning(|_| Ok(9));
    endpoint.expect_submit().times(1).in_sequence(&mut seq).returning(|_| Ok(()));

    let mut dispatch = dispatch_loop(endpoint, worker, blob_template, fixed_fees(), fixed_payload, pacing);
    let start = Instant::now();

    assert_eq!(dispatch.step().await, DispatchOutcome::NonceResynced { stale: 0, adopted: 9 });
    assert_eq!(start.elapsed(), Duration::ZERO);
    assert_matches!(dispatch.step().await, DispatchOutcome::Sent { nonce: 9, .. });
    assert_eq!(dispatch.account().next_nonce(), 10);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn transient_failure_backs_off_and_retries_same_nonce(
    worker: WorkerAccount,
    blob_template: Arc<BlobTxTemplate>,
    fixed_payload: PayloadSource,
    pacing: DispatchPacing,
) {
    let mut seq = Sequence::new();
    let mut endpoint = MockEndpoint::new();
    endpoint
        .expect_submit()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(SubmitError::Transient("txpool is full".to_string())));
    endpoint.expect_submit().times(1).in_sequence(&mut seq).returning(|_| Ok(()));

    let mut dispatch = dispatch_loop(endpoint, worker, blob_template, fixed_fees(), fixed_payload, pacing);
    let start = Instant::now();

    assert_eq!(
        dispatch.step().await,
        DispatchOutcome::Retrying { nonce: 0, reason: "txpool is full".to_string() }
    );
    let after_failure = start.elapsed();
    assert!(after_failure >= FAILURE_BACKOFF && after_failure < FAILURE_BACKOFF * 2);
    assert_eq!(dispatch.account().next_nonce(), 0);

    assert_matches!(dispatch.step().await, DispatchOutcome::Sent { nonce: 0, .. });
    assert_eq!(start.elapsed(), after_failure);
    assert_eq!(dispatch.account().next_nonce(), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn failed_nonce_refresh_keeps_local_nonce(
    worker: WorkerAccount,
    blob_template: Arc<BlobTxTemplate>,
    fixed_payload: PayloadSource,
    pacing: DispatchPacing,
) {
    let mut endpoint = MockEndpoint::new();
    endpoint.expect_submit().times(1).returning(|_| Err(SubmitError::NonceConflict("nonce too high".to_string())));
    endpoint
        .expect_pending_nonce()
        .times(1)
        .returning(|_| Err(EndpointError::Transport("connection reset".to_string())));

    let mut dispatch = dispatch_loop(endpoint, worker, blob_template, fixed_fees(), fixed_payload, pacing);
    let start = Instant::now();

    assert_matches!(dispatch.step().await, DispatchOutcome::Retrying { nonce: 0, .. });
    assert!(start.elapsed() >= FAILURE_BACKOFF);
    assert_eq!(dispatch.account().next_nonce(), 0);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn fee_query_failure_skips_submission(
    worker: WorkerAccount,
    blob_template: Arc<BlobTxTemplate>,
    fixed_payload: PayloadSource,
    pacing: DispatchPacing,
) {
    let mut endpoint = MockEndpoint::new();
    endpoint.expect_gas_price().times(1).returning(|| Err(EndpointError::Transport("timeout".to_string())));
    endpoint.expect_submit().never();

    let fees = FeeResolver::Dynamic { priority_fee: None, max_fee_per_blob_gas: 1, mul_factor: 1.0 };
    let mut dispatch = dispatch_loop(endpoint, worker, blob_template, fees, fixed_payload, pacing);

    assert_matches!(dispatch.step().await, DispatchOutcome::Retrying { nonce: 0, .. });
    assert_eq!(dispatch.account().next_nonce(), 0);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn success_pacing_sleeps_after_each_submission(
    worker: WorkerAccount,
    blob_template: Arc<BlobTxTemplate>,
    fixed_payload: PayloadSource,
) {
    let mut endpoint = MockEndpoint::new();
    endpoint.expect_submit().times(2).returning(|_| Ok(()));

    let pacing = DispatchPacing { success_sleep: Duration::from_millis(500), failure_backoff: FAILURE_BACKOFF };
    let mut dispatch = dispatch_loop(endpoint, worker, blob_template, fixed_fees(), fixed_payload, pacing);
    let start = Instant::now();

    dispatch.step().await;
    dispatch.step().await;
    assert!(start.elapsed() >= Duration::from_secs(1));
    assert_eq!(dispatch.account().next_nonce(), 2);
}
