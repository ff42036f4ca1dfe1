//! Shops
//!
//! A shop is the tenant every timer belongs to, identified by its
//! `*.myshopify.com` domain.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::Serialize;
use thiserror::Error;

/// Longest shop domain accepted as a tenant key.
pub const MAX_SHOP_DOMAIN_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopDomainError {
    #[error("shop domain is required")]
    Blank,

    #[error("shop domain cannot exceed 255 characters")]
    TooLong,

    #[error("shop domain contains invalid characters")]
    InvalidCharacters,
}

/// Shop Domain
///
/// Trimmed, non-empty tenant key. Comparison is exact; the caller is
/// responsible for passing the domain Shopify issued.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Parse a shop domain from untrusted input.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is blank, too long, or contains
    /// whitespace or control characters.
    pub fn parse(value: &str) -> Result<Self, ShopDomainError> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(ShopDomainError::Blank);
        }

        if trimmed.chars().count() > MAX_SHOP_DOMAIN_LEN {
            return Err(ShopDomainError::TooLong);
        }

        if trimmed
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '/')
        {
            return Err(ShopDomainError::InvalidCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ShopDomain {
    type Err = ShopDomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Display for ShopDomain {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShopDomain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_whitespace() {
        let shop = ShopDomain::parse("  acme.myshopify.com \n");

        assert_eq!(
            shop.map(|s| s.to_string()),
            Ok("acme.myshopify.com".to_string())
        );
    }

    #[test]
    fn parse_rejects_blank() {
        assert_eq!(ShopDomain::parse(""), Err(ShopDomainError::Blank));
        assert_eq!(ShopDomain::parse("   "), Err(ShopDomainError::Blank));
    }

    #[test]
    fn parse_rejects_overlong_domain() {
        let long = format!("{}.myshopify.com", "a".repeat(MAX_SHOP_DOMAIN_LEN));

        assert_eq!(ShopDomain::parse(&long), Err(ShopDomainError::TooLong));
    }

    #[test]
    fn parse_rejects_embedded_whitespace_and_slashes() {
        assert_eq!(
            ShopDomain::parse("acme shop.myshopify.com"),
            Err(ShopDomainError::InvalidCharacters)
        );
        assert_eq!(
            ShopDomain::parse("acme.myshopify.com/admin"),
            Err(ShopDomainError::InvalidCharacters)
        );
    }
}
