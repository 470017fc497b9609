use std::sync::{Arc, OnceLock};
use std::time::Duration;

use alloy::primitives::{address, Bytes, U256};
use blob_spammer_codec::{encode_blobs, ProofKind};
use rstest::*;

use crate::core::accounts::{AccountFactory, WorkerAccount};
use crate::core::assembler::BlobTxTemplate;
use crate::core::fee::{FeePolicy, FeeResolver};
use crate::core::payload::{PayloadBundle, PayloadSource};
use crate::worker::dispatch::DispatchPacing;

pub const FAILURE_BACKOFF: Duration = Duration::from_secs(15);

pub const FIXED_FEES: FeePolicy =
    FeePolicy { max_fee_per_gas: 30_000_000_000, max_priority_fee_per_gas: 2_000_000_000, max_fee_per_blob_gas: 1 };

#[fixture]
pub fn blob_template() -> Arc<BlobTxTemplate> {
    Arc::new(BlobTxTemplate {
        chain_id: 1332,
        to: address!("0x00000000000000000000000000000000000000aa"),
        value: U256::ZERO,
        gas_limit: 210_000,
        input: Bytes::new(),
    })
}

/// One small blob, built once per test binary.
#[fixture]
pub fn fixed_payload() -> PayloadSource {
    static BUNDLE: OnceLock<Arc<PayloadBundle>> = OnceLock::new();
    let bundle = BUNDLE.get_or_init(|| {
        Arc::new(PayloadBundle::build(encode_blobs(b"dispatch test payload"), ProofKind::Blob).unwrap())
    });
    PayloadSource::Fixed(Arc::clone(bundle))
}

#[fixture]
pub fn pacing() -> DispatchPacing {
    DispatchPacing { success_sleep: Duration::ZERO, failure_backoff: FAILURE_BACKOFF }
}

#[fixture]
pub fn worker() -> WorkerAccount {
    AccountFactory::generate(1).remove(0)
}

pub fn fixed_fees() -> FeeResolver {
    FeeResolver::Fixed(FIXED_FEES)
}
