//! Shopify Config

use clap::Args;

/// Shopify app credentials.
#[derive(Debug, Args)]
pub struct ShopifyConfig {
    /// App API key; the expected session token audience
    #[arg(long, env = "SHOPIFY_API_KEY")]
    pub shopify_api_key: String,

    /// App API secret; signs session tokens
    #[arg(long, env = "SHOPIFY_API_SECRET", hide_env_values = true)]
    pub shopify_api_secret: String,
}
