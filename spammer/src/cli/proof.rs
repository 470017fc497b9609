use std::path::PathBuf;

use clap::Args;

#[derive(Debug, Clone, Args)]
pub struct ProofCmd {
    /// File whose blobs are evaluated.
    #[arg(env = "BLOB_SPAMMER_BLOB_FILE", long)]
    pub blob_file: PathBuf,

    /// Index of the blob within the file.
    #[arg(env = "BLOB_SPAMMER_BLOB_INDEX", long, default_value_t = 0)]
    pub blob_index: usize,

    /// Evaluation point as 32 bytes of hex, with or without 0x.
    #[arg(env = "BLOB_SPAMMER_INPUT_POINT", long)]
    pub input_point: String,
}
