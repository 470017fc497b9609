use crate::cli::fee::FeeCliArgs;
use crate::core::client::{Endpoint, EndpointError};
use crate::core::fee::{apply_mul_factor, FeePolicy, FeeResolver};
use crate::error::{SpammerError, SpammerResult};

use super::parse_u128;

#[derive(Debug, Clone, PartialEq)]
pub struct FeeSettings {
    pub gas_limit: u64,
    pub gas_price: Option<u128>,
    pub priority_fee: Option<u128>,
    pub max_fee_per_blob_gas: u128,
    pub mul_factor: f64,
}

impl FeeSettings {
    /// Fixed fees when a gas price is configured, otherwise per-attempt queries.
    pub fn resolver(&self) -> FeeResolver {
        match self.gas_price {
            Some(gas_price) => FeeResolver::Fixed(FeePolicy {
                max_fee_per_gas: gas_price,
                max_priority_fee_per_gas: self.priority_fee.unwrap_or(gas_price),
                max_fee_per_blob_gas: self.max_fee_per_blob_gas,
            }),
            None => FeeResolver::Dynamic {
                priority_fee: self.priority_fee,
                max_fee_per_blob_gas: self.max_fee_per_blob_gas,
                mul_factor: self.mul_factor,
            },
        }
    }

    /// Gas price for legacy transfers: the configured one or the endpoint's suggestion.
    pub async fn legacy_gas_price(&self, endpoint: &dyn Endpoint) -> Result<u128, EndpointError> {
        match self.gas_price {
            Some(gas_price) => Ok(gas_price),
            None => Ok(apply_mul_factor(endpoint.gas_price().await?, self.mul_factor)),
        }
    }
}

impl TryFrom<&FeeCliArgs> for FeeSettings {
    type Error = SpammerError;

    fn try_from(args: &FeeCliArgs) -> SpammerResult<Self> {
        if !args.gas_price_mul_factor.is_finite() || args.gas_price_mul_factor <= 0.0 {
            return Err(SpammerError::ConfigError(format!(
                "gas price multiplier must be a positive number, got {}",
                args.gas_price_mul_factor
            )));
        }
        let gas_price = args
            .gas_price
            .as_deref()
            .filter(|literal| !literal.trim().is_empty())
            .map(|literal| parse_u128("gas price", literal))
            .transpose()?;
        let priority_fee = match args.priority_gas_price.trim() {
            "" => None,
            literal => Some(parse_u128("priority gas price", literal)?),
        };

        Ok(Self {
            gas_limit: args.gas_limit,
            gas_price,
            priority_fee,
            max_fee_per_blob_gas: parse_u128("max fee per blob gas", &args.max_fee_per_blob_gas)?,
            mul_factor: args.gas_price_mul_factor,
        })
    }
}
