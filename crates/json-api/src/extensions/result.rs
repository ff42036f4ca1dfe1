//! Result helper extensions for HTTP handlers.

use std::fmt::Display;

use tracing::error;

use crate::errors::ApiError;

/// Map any error to a logged envelope error.
pub(crate) trait ResultExt<T> {
    /// Log the error and answer 500 with `message` as the envelope's `error`.
    fn or_500(self, message: &str) -> Result<T, ApiError>;

    fn or_400(self, message: &str) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Display,
{
    fn or_500(self, message: &str) -> Result<T, ApiError> {
        self.map_err(|error| {
            error!("{message}: {error}");

            ApiError::internal(message)
        })
    }

    fn or_400(self, message: &str) -> Result<T, ApiError> {
        self.map_err(|error| ApiError::bad_request(message).with_message(error.to_string()))
    }
}
