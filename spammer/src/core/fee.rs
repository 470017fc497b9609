use crate::core::client::{Endpoint, EndpointError};

/// Fee fields of a blob transaction, in wei.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeePolicy {
    pub max_fee_per_gas: u128,
    pub max_priority_fee_per_gas: u128,
    pub max_fee_per_blob_gas: u128,
}

/// Where each attempt gets its fees from.
#[derive(Debug, Clone, PartialEq)]
pub enum FeeResolver {
    Fixed(FeePolicy),
    /// Scales the endpoint's suggested gas price by `mul_factor` on every attempt.
    /// Without a configured priority fee the scaled price is used for both fields.
    Dynamic { priority_fee: Option<u128>, max_fee_per_blob_gas: u128, mul_factor: f64 },
}

impl FeeResolver {
    pub async fn resolve(&self, endpoint: &dyn Endpoint) -> Result<FeePolicy, EndpointError> {
        match self {
            FeeResolver::Fixed(policy) => Ok(*policy),
            FeeResolver::Dynamic { priority_fee, max_fee_per_blob_gas, mul_factor } => {
                let gas_price = apply_mul_factor(endpoint.gas_price().await?, *mul_factor);
                Ok(FeePolicy {
                    max_fee_per_gas: gas_price,
                    max_priority_fee_per_gas: priority_fee.unwrap_or(gas_price),
                    max_fee_per_blob_gas: *max_fee_per_blob_gas,
                })
            }
        }
    }
}

pub fn apply_mul_factor(value: u128, mul_factor: f64) -> u128 {
    (value as f64 * mul_factor) as u128
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::core::client::endpoint::MockEndpoint;

    const POLICY: FeePolicy =
        FeePolicy { max_fee_per_gas: 7, max_priority_fee_per_gas: 2, max_fee_per_blob_gas: 30_000_000_000 };

    #[tokio::test]
    async fn fixed_fees_never_query_the_endpoint() {
        let endpoint = MockEndpoint::new();
        assert_eq!(FeeResolver::Fixed(POLICY).resolve(&endpoint).await.unwrap(), POLICY);
    }

    #[rstest]
    #[case::configured_priority(Some(2_000_000_000), 1.0, 10_000_000_000, 2_000_000_000)]
    #[case::scaled(Some(2_000_000_000), 1.5, 15_000_000_000, 2_000_000_000)]
    #[case::priority_follows_price(None, 2.0, 20_000_000_000, 20_000_000_000)]
    #[tokio::test]
    async fn dynamic_fees_scale_suggested_price(
        #[case] priority_fee: Option<u128>,
        #[case] mul_factor: f64,
        #[case] max_fee: u128,
        #[case] priority: u128,
    ) {
        let mut endpoint = MockEndpoint::new();
        endpoint.expect_gas_price().times(1).returning(|| Ok(10_000_000_000));

        let resolver = FeeResolver::Dynamic { priority_fee, max_fee_per_blob_gas: 30, mul_factor };
        let policy = resolver.resolve(&endpoint).await.unwrap();
        assert_eq!(
            policy,
            FeePolicy { max_fee_per_gas: max_fee, max_priority_fee_per_gas: priority, max_fee_per_blob_gas: 30 }
        );
    }

    #[tokio::test]
    async fn dynamic_fees_surface_query_errors() {
        let mut endpoint = MockEndpoint::new();
        endpoint.expect_gas_price().returning(|| Err(EndpointError::Transport("connection refused".to_string())));

        let resolver = FeeResolver::Dynamic { priority_fee: None, max_fee_per_blob_gas: 30, mul_factor: 1.0 };
        assert!(resolver.resolve(&endpoint).await.is_err());
    }
}
