use std::time::Duration;

use alloy::primitives::TxHash;
use mockall::Sequence;
use tokio::time::Instant;

use crate::core::client::endpoint::MockEndpoint;
use crate::core::client::{EndpointError, ReceiptStatus};
use crate::worker::confirmation::{Confirmation, ConfirmationWaiter};

#[tokio::test(start_paused = true)]
async fn waits_through_pending_and_errors_until_included() {
    let tx_hash = TxHash::with_last_byte(0x42);

    let mut seq = Sequence::new();
    let mut endpoint = MockEndpoint::new();
    endpoint.expect_receipt().times(1).in_sequence(&mut seq).returning(|_| Ok(ReceiptStatus::NotFound));
    endpoint
        .expect_receipt()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(EndpointError::Decode("invalid type: string, expected u64".to_string())));
    endpoint
        .expect_receipt()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(ReceiptStatus::Included { block_number: Some(12), success: false }));

    let waiter = ConfirmationWaiter::new(Duration::from_secs(3));
    let start = Instant::now();
    let confirmation = waiter.wait(&endpoint, tx_hash).await;

    assert_eq!(confirmation, Confirmation { tx_hash, block_number: Some(12), success: false });
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_secs(6) && elapsed < Duration::from_secs(7));
}

#[tokio::test]
async fn check_reports_inclusion_without_sleeping() {
    let mut endpoint = MockEndpoint::new();
    endpoint.expect_receipt().times(1).returning(|_| Ok(ReceiptStatus::Included { block_number: None, success: true }));

    let confirmation = ConfirmationWaiter::default().check(&endpoint, TxHash::ZERO).await;
    assert_eq!(confirmation, Some(Confirmation { tx_hash: TxHash::ZERO, block_number: None, success: true }));
}
