//! Widget Projection
//!
//! The public, unauthenticated view of a live timer rendered by the storefront.

use jiff::Timestamp;
use serde::Serialize;

use crate::domain::timers::{
    display::{DisplayOptions, UrgencySettings},
    records::{TimerRecord, TimerUuid},
    status::TimerStatus,
};

/// Widget Timer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetTimer {
    pub id: TimerUuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "endDate")]
    pub ends_at: Timestamp,
    pub display_options: DisplayOptions,
    pub urgency_settings: UrgencySettings,
    pub status: TimerStatus,
    pub is_in_urgency_mode: bool,
}

impl WidgetTimer {
    /// Project a record to its public subset as seen at `now`.
    #[must_use]
    pub fn project(record: TimerRecord, now: Timestamp) -> Self {
        let status = record.status(now);
        let is_in_urgency_mode = record.is_in_urgency_mode(now);

        Self {
            id: record.uuid,
            title: record.title,
            description: record.description,
            ends_at: record.ends_at,
            display_options: record.display_options,
            urgency_settings: record.urgency_settings,
            status,
            is_in_urgency_mode,
        }
    }
}
