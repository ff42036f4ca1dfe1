//! Timer Responses

use jiff::Timestamp;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use countdown_app::domain::timers::{records::TimerRecord, stats::TimerStats};

use crate::timers::models::{DisplayOptionsBody, UrgencySettingsBody};

/// Timer Response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TimerResponse {
    pub id: Uuid,
    pub shop: String,
    pub title: String,
    pub description: String,
    /// RFC 3339 timestamp
    pub start_date: String,
    /// RFC 3339 timestamp
    pub end_date: String,
    pub is_active: bool,
    pub display_options: DisplayOptionsBody,
    pub urgency_settings: UrgencySettingsBody,
    /// `inactive`, `scheduled`, `active` or `expired` at the request's point in time
    pub status: String,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

impl TimerResponse {
    pub(crate) fn from_record(record: TimerRecord, point_in_time: Timestamp) -> Self {
        let status = record.status(point_in_time).as_str().to_string();

        Self {
            id: record.uuid.into_uuid(),
            shop: record.shop.to_string(),
            title: record.title,
            description: record.description,
            start_date: record.starts_at.to_string(),
            end_date: record.ends_at.to_string(),
            is_active: record.is_active,
            display_options: record.display_options.into(),
            urgency_settings: record.urgency_settings.into(),
            status,
            created_at: record.created_at.to_string(),
            updated_at: record.updated_at.to_string(),
        }
    }
}

/// Timers List Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TimersResponse {
    pub success: bool,
    pub timers: Vec<TimerResponse>,
    pub count: usize,
}

impl TimersResponse {
    pub(crate) fn new(timers: Vec<TimerResponse>) -> Self {
        Self {
            success: true,
            count: timers.len(),
            timers,
        }
    }
}

/// Single Timer Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TimerEnvelope {
    pub success: bool,
    pub timer: TimerResponse,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TimerEnvelope {
    pub(crate) fn new(timer: TimerResponse) -> Self {
        Self {
            success: true,
            timer,
            message: None,
        }
    }

    pub(crate) fn with_message(timer: TimerResponse, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::new(timer)
        }
    }
}

/// Timer Deleted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TimerDeletedResponse {
    pub success: bool,
    pub message: String,
    pub deleted_timer: TimerResponse,
}

/// Per-status counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct TimerStatsBody {
    pub total: u64,
    pub active: u64,
    pub scheduled: u64,
    pub expired: u64,
    pub inactive: u64,
}

impl From<TimerStats> for TimerStatsBody {
    fn from(stats: TimerStats) -> Self {
        Self {
            total: stats.total,
            active: stats.active,
            scheduled: stats.scheduled,
            expired: stats.expired,
            inactive: stats.inactive,
        }
    }
}

/// Timer Stats Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TimerStatsResponse {
    pub success: bool,
    pub stats: TimerStatsBody,
}
