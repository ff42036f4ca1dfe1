//! Sessions
//!
//! Shopify session tokens: the short-lived HS256 JWTs App Bridge attaches to
//! every embedded-app request. A verified token resolves to the shop that
//! scopes all timer operations.

mod claims;
mod errors;
mod service;

pub use claims::SessionClaims;
pub use errors::*;
pub use service::*;
