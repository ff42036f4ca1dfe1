//! Timer status and urgency derivation.
//!
//! Status is never stored. It is recomputed from the activity flag, the timer
//! window and the caller-supplied point in time on every read.

use std::fmt::{self, Display, Formatter};

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::domain::timers::display::UrgencySettings;

/// Derived timer status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// Switched off by the merchant, regardless of dates.
    Inactive,

    /// Enabled, but the window has not opened yet.
    Scheduled,

    /// Enabled and inside its window.
    Active,

    /// Enabled, but the window has closed.
    Expired,
}

impl TimerStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Scheduled => "scheduled",
            Self::Active => "active",
            Self::Expired => "expired",
        }
    }
}

impl Display for TimerStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the status of a timer at `now`.
///
/// Precedence: inactive, then scheduled, then expired, then active. Both
/// window boundaries count as active.
#[must_use]
pub fn derive(
    is_active: bool,
    starts_at: Timestamp,
    ends_at: Timestamp,
    now: Timestamp,
) -> TimerStatus {
    if !is_active {
        TimerStatus::Inactive
    } else if now < starts_at {
        TimerStatus::Scheduled
    } else if now > ends_at {
        TimerStatus::Expired
    } else {
        TimerStatus::Active
    }
}

/// Whether an enabled timer's window contains `now` (inclusive on both ends).
#[must_use]
pub fn is_running(
    is_active: bool,
    starts_at: Timestamp,
    ends_at: Timestamp,
    now: Timestamp,
) -> bool {
    is_active && starts_at <= now && now <= ends_at
}

/// Whether the time left until `ends_at` is positive and within the urgency
/// threshold. Does not check that the timer is running.
#[must_use]
pub fn within_urgency_window(
    urgency: &UrgencySettings,
    ends_at: Timestamp,
    now: Timestamp,
) -> bool {
    if !urgency.enabled {
        return false;
    }

    let remaining = ends_at.duration_since(now);
    let threshold = SignedDuration::from_mins(i64::from(urgency.threshold_minutes));

    remaining > SignedDuration::ZERO && remaining <= threshold
}
