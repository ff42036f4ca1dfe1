use clap::Args;
use countdown_app::{domain::shops::ShopDomain, sessions::ShopifySessions};
use jiff::{SignedDuration, Timestamp};

#[derive(Debug, Args)]
pub(crate) struct SessionTokenArgs {
    /// Shop domain the token is issued for
    #[arg(long)]
    shop: ShopDomain,

    /// Token lifetime in seconds
    #[arg(long, default_value_t = 3600)]
    ttl_seconds: u32,

    /// Shopify app API key
    #[arg(long, env = "SHOPIFY_API_KEY")]
    api_key: String,

    /// Shopify app API secret
    #[arg(long, env = "SHOPIFY_API_SECRET", hide_env_values = true)]
    api_secret: String,
}

pub(crate) fn run(args: &SessionTokenArgs) -> Result<(), String> {
    if args.ttl_seconds == 0 {
        return Err("ttl_seconds must be positive".to_string());
    }

    let sessions = ShopifySessions::new(&args.api_key, &args.api_secret);
    let ttl = SignedDuration::from_secs(i64::from(args.ttl_seconds));

    let token = sessions
        .mint(&args.shop, ttl, Timestamp::now())
        .map_err(|error| format!("failed to mint session token: {error}"))?;

    println!("shop: {}", args.shop);
    println!("expires_in_seconds: {}", args.ttl_seconds);
    println!("session_token: {token}");
    println!("for local development only; Shopify issues these in production");

    Ok(())
}
