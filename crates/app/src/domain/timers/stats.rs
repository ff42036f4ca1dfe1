//! Timer Stats

use serde::Serialize;

/// Per-status timer counts for one shop at one point in time.
///
/// Buckets partition the shop's timers, so they always add up to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimerStats {
    pub total: u64,
    pub active: u64,
    pub scheduled: u64,
    pub expired: u64,
    pub inactive: u64,
}
