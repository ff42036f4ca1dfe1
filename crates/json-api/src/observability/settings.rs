//! Request settings shared with the logging middleware.

use std::{sync::OnceLock, time::Duration};

use crate::config::observability::ObservabilityConfig;

static REQUEST_SETTINGS: OnceLock<RequestSettings> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct RequestSettings {
    pub(super) slow_request_threshold: Duration,
    pub(super) parent_propagation: bool,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            slow_request_threshold: Duration::from_secs(1),
            parent_propagation: false,
        }
    }
}

impl From<&ObservabilityConfig> for RequestSettings {
    fn from(config: &ObservabilityConfig) -> Self {
        Self {
            slow_request_threshold: config.slow_request_threshold(),
            parent_propagation: config.parent_propagation(),
        }
    }
}

/// First install wins; later calls are ignored.
pub(super) fn install(config: &ObservabilityConfig) {
    _ = REQUEST_SETTINGS.set(RequestSettings::from(config));
}

/// Installed settings, or the defaults when nothing was installed (tests).
pub(super) fn current() -> RequestSettings {
    REQUEST_SETTINGS.get().copied().unwrap_or_default()
}
