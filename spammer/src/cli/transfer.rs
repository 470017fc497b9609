use clap::Args;

use super::{NonceCliArgs, RpcCliArgs, SignerCliArgs};

#[derive(Debug, Clone, Args)]
pub struct TransferCmd {
    #[clap(flatten)]
    pub rpc: RpcCliArgs,

    #[clap(flatten)]
    pub signer: SignerCliArgs,

    #[clap(flatten)]
    pub nonce: NonceCliArgs,

    /// Recipient address.
    #[arg(env = "BLOB_SPAMMER_TO", long)]
    pub to: String,

    /// Value in wei, decimal or 0x hex.
    #[arg(env = "BLOB_SPAMMER_VALUE", long, default_value = "0x0")]
    pub value: String,
}

#[derive(Debug, Clone, Args)]
pub struct BatchTransferCmd {
    #[clap(flatten)]
    pub transfer: TransferCmd,

    /// Pause after every `delta-nonce` nonces.
    #[arg(env = "BLOB_SPAMMER_DELTA_NONCE", long, default_value_t = 10)]
    pub delta_nonce: u64,

    /// Length of the pause, in seconds.
    #[arg(env = "BLOB_SPAMMER_DELTA_SLEEP", long, alias = "delta-sleep-time", default_value_t = 60)]
    pub delta_sleep: u64,
}
