//! Sessions service.

use std::fmt::{self, Debug, Formatter};

use async_trait::async_trait;
use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};
use mockall::automock;
use uuid::Uuid;

use crate::{
    domain::shops::ShopDomain,
    sessions::{SessionClaims, SessionsServiceError},
};

/// Allowed clock skew between Shopify and this server, in seconds.
pub const SESSION_TOKEN_LEEWAY_SECS: u64 = 5;

/// Verifies and mints Shopify session tokens signed with the app secret.
#[derive(Clone)]
pub struct ShopifySessions {
    api_key: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl ShopifySessions {
    #[must_use]
    pub fn new(api_key: &str, api_secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        validation.set_audience(&[api_key]);
        validation.set_required_spec_claims(&["exp", "nbf", "aud"]);
        validation.validate_nbf = true;
        validation.leeway = SESSION_TOKEN_LEEWAY_SECS;

        Self {
            api_key: api_key.to_string(),
            encoding_key: EncodingKey::from_secret(api_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(api_secret.as_bytes()),
            validation,
        }
    }

    /// Issue a session token for `shop`, valid from `now` for `ttl`.
    ///
    /// Shopify issues these in production; this exists for local development
    /// and tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be signed.
    pub fn mint(
        &self,
        shop: &ShopDomain,
        ttl: SignedDuration,
        now: Timestamp,
    ) -> Result<String, SessionsServiceError> {
        let issued_at = now.as_second();

        let claims = SessionClaims {
            iss: format!("https://{shop}/admin"),
            dest: format!("https://{shop}"),
            aud: self.api_key.clone(),
            sub: None,
            exp: issued_at.saturating_add(ttl.as_secs()),
            nbf: issued_at,
            iat: issued_at,
            jti: Uuid::now_v7().to_string(),
            sid: None,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(SessionsServiceError::Signing)
    }

    /// Verify the signature and registered claims, then resolve the shop.
    ///
    /// # Errors
    ///
    /// Returns an error when the token is malformed, expired, not yet valid,
    /// signed with another secret, issued for another app, or names a shop
    /// inconsistently.
    pub fn verify(&self, token: &str) -> Result<ShopDomain, SessionsServiceError> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(SessionsServiceError::InvalidToken)?
            .claims;

        let dest = claims
            .dest_host()
            .ok_or(SessionsServiceError::InvalidDestination)?;

        if claims.iss_host() != Some(dest) {
            return Err(SessionsServiceError::IssuerMismatch);
        }

        Ok(ShopDomain::parse(dest)?)
    }
}

impl Debug for ShopifySessions {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShopifySessions")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl SessionsService for ShopifySessions {
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<ShopDomain, SessionsServiceError> {
        self.verify(bearer_token)
    }
}

#[automock]
#[async_trait]
pub trait SessionsService: Send + Sync {
    /// Resolve the shop a bearer session token was issued for.
    async fn authenticate_bearer(
        &self,
        bearer_token: &str,
    ) -> Result<ShopDomain, SessionsServiceError>;
}
