//! Validated settings of every command.
//!
//! Each `*Cmd` from [`crate::cli`] converts into a settings struct with `TryFrom`. All literal
//! parsing and file reading happens there, so a bad flag is reported before any RPC call.
use std::str::FromStr as _;

use alloy::primitives::{Address, Bytes, U256};
use alloy::signers::local::PrivateKeySigner;

use crate::error::{SpammerError, SpammerResult};

pub mod fee;
pub mod proof;
pub mod stress;
pub mod transfer;
pub mod tx;

pub use fee::FeeSettings;
pub use proof::ProofSettings;
pub use stress::StressSettings;
pub use transfer::{BatchTransferSettings, TransferSettings};
pub use tx::{TxPayload, TxSettings};

/// Parses a 256-bit integer literal, `0x`-prefixed hex or decimal.
pub fn parse_u256(what: &str, literal: &str) -> SpammerResult<U256> {
    let trimmed = literal.trim();
    let (digits, radix) = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (trimmed, 10),
    };
    if digits.is_empty() {
        return Err(SpammerError::ConfigError(format!("invalid {what} {literal:?}: no digits")));
    }
    let parsed = U256::from_str_radix(digits, radix);
    parsed.map_err(|e| SpammerError::ConfigError(format!("invalid {what} {literal:?}: {e}")))
}

pub fn parse_u128(what: &str, literal: &str) -> SpammerResult<u128> {
    let value = parse_u256(what, literal)?;
    u128::try_from(value).map_err(|_| SpammerError::ConfigError(format!("{what} {literal} does not fit in 128 bits")))
}

pub fn parse_u64(what: &str, literal: &str) -> SpammerResult<u64> {
    let value = parse_u256(what, literal)?;
    u64::try_from(value).map_err(|_| SpammerError::ConfigError(format!("{what} {literal} does not fit in 64 bits")))
}

/// `0x`-prefixed input is hex, anything else is used as raw UTF-8 bytes.
pub fn parse_calldata(literal: &str) -> SpammerResult<Bytes> {
    match literal.strip_prefix("0x") {
        Some(hex_data) => hex::decode(hex_data)
            .map(Bytes::from)
            .map_err(|e| SpammerError::ConfigError(format!("invalid hex calldata {literal:?}: {e}"))),
        None => Ok(Bytes::copy_from_slice(literal.as_bytes())),
    }
}

pub fn parse_private_key(literal: &str) -> SpammerResult<PrivateKeySigner> {
    Ok(PrivateKeySigner::from_str(literal.trim())?)
}

pub fn parse_address(literal: &str) -> SpammerResult<Address> {
    Ok(Address::from_str(literal.trim())?)
}

/// `-1` means "ask the endpoint".
pub fn parse_nonce(nonce: i64) -> SpammerResult<Option<u64>> {
    match nonce {
        -1 => Ok(None),
        n => u64::try_from(n).map(Some).map_err(|_| SpammerError::ConfigError(format!("invalid nonce {n}"))),
    }
}
