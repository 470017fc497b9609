use alloy::primitives::B256;

use crate::cli::proof::ProofCmd;
use crate::error::{SpammerError, SpammerResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofSettings {
    pub data: Vec<u8>,
    pub blob_index: usize,
    pub point: B256,
}

/// Reads a 32-byte evaluation point given as exactly 64 hex characters.
pub fn parse_point(literal: &str) -> SpammerResult<B256> {
    let digits = literal.trim().trim_start_matches("0x");
    if digits.len() != 64 {
        return Err(SpammerError::ConfigError(format!(
            "input point must be 32 bytes of hex, got {} characters",
            digits.len()
        )));
    }
    let bytes =
        hex::decode(digits).map_err(|e| SpammerError::ConfigError(format!("invalid input point {literal:?}: {e}")))?;
    Ok(B256::from_slice(&bytes))
}

impl TryFrom<&ProofCmd> for ProofSettings {
    type Error = SpammerError;

    fn try_from(cmd: &ProofCmd) -> SpammerResult<Self> {
        let point = parse_point(&cmd.input_point)?;
        let data = std::fs::read(&cmd.blob_file).map_err(|e| {
            SpammerError::ConfigError(format!("failed to read blob file {}: {e}", cmd.blob_file.display()))
        })?;
        Ok(Self { data, blob_index: cmd.blob_index, point })
    }
}
