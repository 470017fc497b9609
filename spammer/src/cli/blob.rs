use clap::{Args, ValueEnum};

/// Recipient, value and payload shape of blob transactions.
#[derive(Debug, Clone, Args)]
pub struct BlobTxCliArgs {
    /// Recipient address.
    #[arg(env = "BLOB_SPAMMER_TO", long)]
    pub to: String,

    /// Value in wei, decimal or 0x hex.
    #[arg(env = "BLOB_SPAMMER_VALUE", long, default_value = "0x0")]
    pub value: String,

    /// Transaction input. 0x-prefixed values are hex, anything else is taken as UTF-8 bytes.
    #[arg(env = "BLOB_SPAMMER_CALLDATA", long, default_value = "0x")]
    pub calldata: String,

    /// Blobs per transaction when the payload is random.
    #[arg(env = "BLOB_SPAMMER_BLOB_COUNT", long, alias = "tx-blob-count", default_value_t = 2)]
    pub blob_count: usize,

    /// Random bytes per blob, rounded down to a multiple of 32.
    #[arg(env = "BLOB_SPAMMER_BLOB_SIZE", long, default_value_t = 131_072)]
    pub blob_size: usize,

    /// Attach EIP-7594 cell proofs instead of one proof per blob.
    #[arg(env = "BLOB_SPAMMER_CELL_PROOFS", long, default_value_t = false)]
    pub cell_proofs: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PayloadMode {
    /// One random payload shared by every transaction.
    #[default]
    Fixed,
    /// A new random payload for every attempt.
    Random,
}
