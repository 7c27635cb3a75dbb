use clap::Args;

pub const DEFAULT_PRICE_ID: &str = "price_monthly";

/// Settings for the hosted gateway processor.
///
/// Parsed from the command line or the environment by the binary and handed to
/// the processor factory.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    /// Price (plan) identifier used when setting up recurring payments
    #[arg(long, env = "GATEWAY_PRICE_ID", default_value = DEFAULT_PRICE_ID)]
    pub price_id: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            price_id: DEFAULT_PRICE_ID.to_string(),
        }
    }
}
