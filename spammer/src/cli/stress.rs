use clap::Args;
use url::Url;

use super::blob::{BlobTxCliArgs, PayloadMode};
use super::fee::FeeCliArgs;
use super::SignerCliArgs;

#[derive(Debug, Clone, Args)]
pub struct StressCmd {
    /// Execution node endpoints. Worker `i` sends to endpoint `i % len`.
    #[arg(
        env = "BLOB_SPAMMER_RPC_URLS",
        long,
        alias = "rpc-url",
        value_delimiter = ',',
        default_value = "http://127.0.0.1:8545"
    )]
    pub rpc_urls: Vec<Url>,

    #[clap(flatten)]
    pub signer: SignerCliArgs,

    #[clap(flatten)]
    pub blob: BlobTxCliArgs,

    #[clap(flatten)]
    pub fee: FeeCliArgs,

    /// Number of worker accounts sending in parallel.
    #[arg(env = "BLOB_SPAMMER_TX_CONCURRENCE", long, default_value_t = 4)]
    pub tx_concurrence: usize,

    /// Milliseconds to sleep after an accepted transaction.
    #[arg(env = "BLOB_SPAMMER_TX_SLEEP_SUCCESS", long, default_value_t = 0)]
    pub tx_sleep_success: u64,

    /// Seconds to wait after a failed submission, e.g. when the pool is full.
    #[arg(env = "BLOB_SPAMMER_TX_WAITING", long, default_value_t = 15)]
    pub tx_waiting: u64,

    /// Seconds between two worker launches.
    #[arg(env = "BLOB_SPAMMER_LAUNCH_STAGGER", long, default_value_t = 1)]
    pub launch_stagger: u64,

    /// Ether sent to every worker before it starts.
    #[arg(env = "BLOB_SPAMMER_FUNDING_AMOUNT", long, default_value = "50")]
    pub funding_amount: String,

    #[arg(env = "BLOB_SPAMMER_PAYLOAD_MODE", long, value_enum, default_value_t = PayloadMode::Fixed)]
    pub payload_mode: PayloadMode,
}
