//! Sessions service errors.

use thiserror::Error;

use crate::domain::shops::ShopDomainError;

#[derive(Debug, Error)]
pub enum SessionsServiceError {
    #[error("invalid session token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("session token has no valid destination")]
    InvalidDestination,

    #[error("session token issuer does not match its destination")]
    IssuerMismatch,

    #[error("session token names an invalid shop")]
    InvalidShop(#[from] ShopDomainError),

    #[error("failed to sign session token")]
    Signing(#[source] jsonwebtoken::errors::Error),
}
