//! Timer Records

use jiff::Timestamp;
use serde::Serialize;

use crate::{
    domain::{
        shops::ShopDomain,
        timers::{
            display::{DisplayOptions, UrgencySettings},
            status::{self, TimerStatus},
        },
    },
    uuids::TypedUuid,
};

/// Timer UUID
pub type TimerUuid = TypedUuid<TimerRecord>;

/// Timer Record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerRecord {
    #[serde(rename = "id")]
    pub uuid: TimerUuid,
    pub shop: ShopDomain,
    pub title: String,
    pub description: String,
    #[serde(rename = "startDate")]
    pub starts_at: Timestamp,
    #[serde(rename = "endDate")]
    pub ends_at: Timestamp,
    pub is_active: bool,
    pub display_options: DisplayOptions,
    pub urgency_settings: UrgencySettings,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TimerRecord {
    /// Status of this timer at `now`.
    #[must_use]
    pub fn status(&self, now: Timestamp) -> TimerStatus {
        status::derive(self.is_active, self.starts_at, self.ends_at, now)
    }

    /// Whether the timer is enabled and `now` falls inside its window.
    #[must_use]
    pub fn is_running(&self, now: Timestamp) -> bool {
        status::is_running(self.is_active, self.starts_at, self.ends_at, now)
    }

    /// Whether the timer is running and within its urgency threshold of ending.
    #[must_use]
    pub fn is_in_urgency_mode(&self, now: Timestamp) -> bool {
        self.is_running(now)
            && status::within_urgency_window(&self.urgency_settings, self.ends_at, now)
    }
}
