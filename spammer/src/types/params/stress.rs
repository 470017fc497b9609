use std::time::Duration;

use alloy::primitives::utils::parse_ether;
use alloy::primitives::U256;
use alloy::signers::local::PrivateKeySigner;
use url::Url;

use crate::cli::blob::PayloadMode;
use crate::cli::stress::StressCmd;
use crate::core::assembler::BlobTxTemplate;
use crate::core::payload::PayloadSpec;
use crate::error::{SpammerError, SpammerResult};
use crate::worker::dispatch::DispatchPacing;

use super::tx::blob_template;
use super::{parse_private_key, FeeSettings};

#[derive(Debug, Clone)]
pub struct StressSettings {
    pub rpc_urls: Vec<Url>,
    pub master: PrivateKeySigner,
    pub template: BlobTxTemplate,
    pub fees: FeeSettings,
    pub workers: usize,
    pub payload: PayloadSpec,
    pub payload_mode: PayloadMode,
    pub pacing: DispatchPacing,
    pub launch_stagger: Duration,
    /// Wei sent to every worker before its loop starts.
    pub funding_amount: U256,
}

impl TryFrom<&StressCmd> for StressSettings {
    type Error = SpammerError;

    fn try_from(cmd: &StressCmd) -> SpammerResult<Self> {
        if cmd.rpc_urls.is_empty() {
            return Err(SpammerError::ConfigError("at least one RPC endpoint is required".to_string()));
        }
        if cmd.tx_concurrence == 0 {
            return Err(SpammerError::ConfigError("tx concurrence must be at least 1".to_string()));
        }
        let fees = FeeSettings::try_from(&cmd.fee)?;
        let (template, payload) = blob_template(&cmd.blob, &cmd.signer.chain_id, fees.gas_limit)?;
        let funding_amount = parse_ether(&cmd.funding_amount).map_err(|e| {
            SpammerError::ConfigError(format!("invalid funding amount {:?}: {e}", cmd.funding_amount))
        })?;

        Ok(Self {
            rpc_urls: cmd.rpc_urls.clone(),
            master: parse_private_key(&cmd.signer.private_key)?,
            template,
            fees,
            workers: cmd.tx_concurrence,
            payload,
            payload_mode: cmd.payload_mode,
            pacing: DispatchPacing {
                success_sleep: Duration::from_millis(cmd.tx_sleep_success),
                failure_backoff: Duration::from_secs(cmd.tx_waiting),
            },
            launch_stagger: Duration::from_secs(cmd.launch_stagger),
            funding_amount,
        })
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use clap::Parser;
    use rstest::rstest;

    use super::*;
    use crate::cli::{Cli, Commands};

    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const TO: &str = "0x00000000000000000000000000000000000000aa";

    fn stress_cmd(extra: &[&str]) -> StressCmd {
        let mut argv = vec!["blob-spammer", "stress", "--private-key", KEY, "--to", TO];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Stress { stress_command } => *stress_command,
            other => panic!("expected stress, got {}", other.name()),
        }
    }

    #[test]
    fn defaults_follow_the_flags() {
        let settings = StressSettings::try_from(&stress_cmd(&[])).unwrap();
        assert_eq!(settings.rpc_urls.len(), 1);
        assert_eq!(settings.workers, 4);
        assert_eq!(settings.payload.blob_count, 2);
        assert_eq!(settings.payload_mode, PayloadMode::Fixed);
        assert_eq!(
            settings.pacing,
            DispatchPacing { success_sleep: Duration::ZERO, failure_backoff: Duration::from_secs(15) }
        );
        assert_eq!(settings.launch_stagger, Duration::from_secs(1));
        assert_eq!(settings.funding_amount, U256::from(50u64) * U256::from(10u64).pow(U256::from(18u64)));
    }

    #[test]
    fn endpoint_list_is_comma_separated() {
        let args = ["--rpc-urls", "http://a:8545,http://b:8545", "--payload-mode", "random"];
        let settings = StressSettings::try_from(&stress_cmd(&args)).unwrap();
        assert_eq!(settings.rpc_urls.len(), 2);
        assert_eq!(settings.payload_mode, PayloadMode::Random);
    }

    #[rstest]
    #[case::no_workers(&["--tx-concurrence", "0"])]
    #[case::bad_funding(&["--funding-amount", "plenty"])]
    #[case::bad_value(&["--value", "0xnope"])]
    #[case::no_blobs(&["--blob-count", "0"])]
    fn invalid_flags_are_config_errors(#[case] extra: &[&str]) {
        assert_matches!(StressSettings::try_from(&stress_cmd(extra)), Err(SpammerError::ConfigError(_)));
    }
}
