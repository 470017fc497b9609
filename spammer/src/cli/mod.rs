use clap::{Args, Parser, Subcommand};
use url::Url;

pub mod blob;
pub mod fee;
pub mod proof;
pub mod stress;
pub mod transfer;
pub mod tx;

pub use proof::ProofCmd;
pub use stress::StressCmd;
pub use transfer::{BatchTransferCmd, TransferCmd};
pub use tx::TxCmd;

#[derive(Parser, Debug)]
#[command(
    name = "blob-spammer",
    about = "Blob transaction load generator for execution-layer endpoints",
    after_help = "Examples:\n  \
    blob-spammer tx --private-key <KEY> --to <ADDR> --blob-file data.bin\n  \
    blob-spammer stress --private-key <KEY> --to <ADDR> --rpc-urls http://node-a:8545,http://node-b:8545\n  \
    blob-spammer proof --blob-file data.bin --blob-index 0 --input-point <32-BYTE-HEX>"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a single blob transaction carrying a file or random data
    Tx {
        #[command(flatten)]
        tx_command: Box<TxCmd>,
    },
    /// Fund worker accounts and keep every one of them sending blob transactions
    #[command(alias = "batch-tx")]
    Stress {
        #[command(flatten)]
        stress_command: Box<StressCmd>,
    },
    /// Send one value transfer and wait for its inclusion
    Transfer {
        #[command(flatten)]
        transfer_command: Box<TransferCmd>,
    },
    /// Send value transfers forever, pausing every few nonces
    BatchTransfer {
        #[command(flatten)]
        batch_transfer_command: Box<BatchTransferCmd>,
    },
    /// Compute a KZG point evaluation proof for one blob of a file
    Proof {
        #[command(flatten)]
        proof_command: Box<ProofCmd>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Tx { .. } => "tx",
            Commands::Stress { .. } => "stress",
            Commands::Transfer { .. } => "transfer",
            Commands::BatchTransfer { .. } => "batch-transfer",
            Commands::Proof { .. } => "proof",
        }
    }
}

/// Single endpoint used by the one-account commands.
#[derive(Debug, Clone, Args)]
pub struct RpcCliArgs {
    /// Address of the execution node JSON-RPC endpoint.
    #[arg(env = "BLOB_SPAMMER_RPC_URL", long, default_value = "http://127.0.0.1:8545")]
    pub rpc_url: Url,
}

/// The funded account transactions are signed with.
#[derive(Debug, Clone, Args)]
pub struct SignerCliArgs {
    /// Hex encoded secp256k1 private key, with or without 0x.
    #[arg(env = "BLOB_SPAMMER_PRIVATE_KEY", long)]
    pub private_key: String,

    /// Chain id the transactions are signed for, decimal or 0x hex.
    #[arg(env = "BLOB_SPAMMER_CHAIN_ID", long, default_value = "1332")]
    pub chain_id: String,
}

#[derive(Debug, Clone, Args)]
pub struct NonceCliArgs {
    /// Nonce of the first transaction. -1 reads the pending nonce from the endpoint.
    #[arg(env = "BLOB_SPAMMER_NONCE", long, default_value_t = -1, allow_hyphen_values = true)]
    pub nonce: i64,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use rstest::rstest;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[rstest]
    #[case::stress("stress")]
    #[case::alias("batch-tx")]
    fn stress_is_reachable_by_alias(#[case] name: &str) {
        let cli = Cli::try_parse_from(["blob-spammer", name, "--private-key", "0x01", "--to", "0x01"]).unwrap();
        assert_eq!(cli.command.name(), "stress");
    }

    #[test]
    fn negative_nonce_is_accepted() {
        let cli =
            Cli::try_parse_from(["blob-spammer", "transfer", "--private-key", "0x01", "--to", "0x01", "--nonce", "-1"])
                .unwrap();
        let Commands::Transfer { transfer_command } = cli.command else { panic!("expected transfer") };
        assert_eq!(transfer_command.nonce.nonce, -1);
    }
}
