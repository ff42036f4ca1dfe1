//! Session token claims.

use serde::{Deserialize, Serialize};

/// Claims carried by a Shopify session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Shop admin URL, `https://<shop>/admin`.
    pub iss: String,
    /// Shop URL, `https://<shop>`.
    pub dest: String,
    /// App API key.
    pub aud: String,
    /// Staff user id; absent on tokens minted for development.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub exp: i64,
    pub nbf: i64,
    pub iat: i64,
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
}

impl SessionClaims {
    /// Host named by the `dest` claim.
    #[must_use]
    pub fn dest_host(&self) -> Option<&str> {
        url_host(&self.dest)
    }

    /// Host named by the `iss` claim.
    #[must_use]
    pub fn iss_host(&self) -> Option<&str> {
        url_host(&self.iss)
    }
}

fn url_host(url: &str) -> Option<&str> {
    let rest = url.strip_prefix("https://")?;
    let host = rest.split('/').next().unwrap_or(rest);

    (!host.is_empty()).then_some(host)
}
