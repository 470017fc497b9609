use std::time::Duration;

use alloy::primitives::{Address, U256};
use alloy::signers::local::PrivateKeySigner;
use url::Url;

use crate::cli::transfer::{BatchTransferCmd, TransferCmd};
use crate::error::{SpammerError, SpammerResult};

use super::{parse_address, parse_nonce, parse_private_key, parse_u256, parse_u64};

#[derive(Debug, Clone)]
pub struct TransferSettings {
    pub rpc_url: Url,
    pub signer: PrivateKeySigner,
    pub nonce: Option<u64>,
    pub chain_id: u64,
    pub to: Address,
    pub value: U256,
}

impl TryFrom<&TransferCmd> for TransferSettings {
    type Error = SpammerError;

    fn try_from(cmd: &TransferCmd) -> SpammerResult<Self> {
        Ok(Self {
            rpc_url: cmd.rpc.rpc_url.clone(),
            signer: parse_private_key(&cmd.signer.private_key)?,
            nonce: parse_nonce(cmd.nonce.nonce)?,
            chain_id: parse_u64("chain id", &cmd.signer.chain_id)?,
            to: parse_address(&cmd.to)?,
            value: parse_u256("value", &cmd.value)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct BatchTransferSettings {
    pub transfer: TransferSettings,
    pub delta_nonce: u64,
    pub delta_sleep: Duration,
}

impl TryFrom<&BatchTransferCmd> for BatchTransferSettings {
    type Error = SpammerError;

    fn try_from(cmd: &BatchTransferCmd) -> SpammerResult<Self> {
        if cmd.delta_nonce == 0 {
            return Err(SpammerError::ConfigError("delta nonce must be at least 1".to_string()));
        }
        Ok(Self {
            transfer: TransferSettings::try_from(&cmd.transfer)?,
            delta_nonce: cmd.delta_nonce,
            delta_sleep: Duration::from_secs(cmd.delta_sleep),
        })
    }
}
