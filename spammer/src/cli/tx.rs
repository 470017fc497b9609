use std::path::PathBuf;

use clap::Args;

use super::blob::BlobTxCliArgs;
use super::fee::FeeCliArgs;
use super::{NonceCliArgs, RpcCliArgs, SignerCliArgs};

#[derive(Debug, Clone, Args)]
pub struct TxCmd {
    #[clap(flatten)]
    pub rpc: RpcCliArgs,

    #[clap(flatten)]
    pub signer: SignerCliArgs,

    #[clap(flatten)]
    pub nonce: NonceCliArgs,

    #[clap(flatten)]
    pub blob: BlobTxCliArgs,

    #[clap(flatten)]
    pub fee: FeeCliArgs,

    /// File to carry in the blobs. Random data is sent when absent.
    #[arg(env = "BLOB_SPAMMER_BLOB_FILE", long)]
    pub blob_file: Option<PathBuf>,

    /// Wait until the transaction is included.
    #[arg(
        env = "BLOB_SPAMMER_WAIT_INCLUSION",
        long,
        alias = "tx-wait-inclusion",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    pub wait_inclusion: bool,
}
