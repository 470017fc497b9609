use clap::Args;

/// Gas and fee fields of a blob transaction. Numeric literals are decimal or 0x hex.
#[derive(Debug, Clone, Args)]
pub struct FeeCliArgs {
    #[arg(env = "BLOB_SPAMMER_GAS_LIMIT", long, default_value_t = 210_000)]
    pub gas_limit: u64,

    /// Sets max_fee_per_gas. When absent the endpoint's suggested gas price is used.
    #[arg(env = "BLOB_SPAMMER_GAS_PRICE", long)]
    pub gas_price: Option<String>,

    /// Sets max_priority_fee_per_gas. An empty value falls back to the gas price.
    #[arg(env = "BLOB_SPAMMER_PRIORITY_GAS_PRICE", long, default_value = "2000000000")]
    pub priority_gas_price: String,

    #[arg(env = "BLOB_SPAMMER_MAX_FEE_PER_BLOB_GAS", long, default_value = "30000000000")]
    pub max_fee_per_blob_gas: String,

    /// Multiplier applied to the suggested gas price.
    #[arg(env = "BLOB_SPAMMER_GAS_PRICE_MUL_FACTOR", long, default_value_t = 1.0)]
    pub gas_price_mul_factor: f64,
}
