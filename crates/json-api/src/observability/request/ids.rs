//! Request correlation ids.

use std::fmt;

use salvo::{http::header::HeaderValue, prelude::Response};
use tracing::warn;
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_INCOMING_LEN: usize = 128;

/// Echoed back on every response under [`REQUEST_ID_HEADER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct RequestId(String);

impl RequestId {
    /// Reuse a caller-supplied id when it is short printable ASCII, otherwise
    /// mint a fresh UUID v7.
    pub(super) fn from_header(incoming: Option<&str>) -> Self {
        incoming
            .map(str::trim)
            .filter(|value| is_acceptable(value))
            .map_or_else(Self::generate, |value| Self(value.to_owned()))
    }

    fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    pub(super) fn write_header(&self, res: &mut Response) {
        match HeaderValue::from_str(&self.0) {
            Ok(value) => {
                res.headers_mut().insert(REQUEST_ID_HEADER, value);
            }
            Err(source) => {
                warn!(request_id = %self, "request id is not a valid header value: {source}");
            }
        }
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_acceptable(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_INCOMING_LEN
        && value.bytes().all(|b| b.is_ascii_graphic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_id_is_reused() {
        let id = RequestId::from_header(Some("  req-123  "));

        assert_eq!(id.as_str(), "req-123");
    }

    #[test]
    fn missing_or_blank_id_is_generated() {
        for incoming in [None, Some(""), Some("   ")] {
            let id = RequestId::from_header(incoming);

            assert!(Uuid::parse_str(id.as_str()).is_ok(), "{incoming:?} -> {id}");
        }
    }

    #[test]
    fn unprintable_or_oversized_id_is_replaced() {
        let oversized = "a".repeat(MAX_INCOMING_LEN + 1);

        for incoming in ["two words", "caf\u{e9}", oversized.as_str()] {
            let id = RequestId::from_header(Some(incoming));

            assert_ne!(id.as_str(), incoming);
        }
    }
}
