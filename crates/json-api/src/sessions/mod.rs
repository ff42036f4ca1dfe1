//! Shopify session handling

pub(crate) mod middleware;
