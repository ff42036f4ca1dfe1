//! Timer Requests
//!
//! Bodies are accepted loosely typed so that missing or unparsable fields are
//! reported with field messages instead of a bare deserialization failure.

use jiff::{Timestamp, civil::DateTime, tz::TimeZone};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use countdown_app::domain::timers::{
    data::{
        DESCRIPTION_REQUIRED, END_DATE_INVALID, END_DATE_REQUIRED, NewTimer, START_DATE_INVALID,
        START_DATE_REQUIRED, TITLE_REQUIRED, TimerUpdate,
    },
    validation::ValidationErrors,
};

use crate::timers::models::{DisplayOptionsInput, UrgencySettingsInput};

/// Create Timer Request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateTimerRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// RFC 3339 timestamp, or a local date and time read as UTC
    pub start_date: Option<String>,
    /// RFC 3339 timestamp, or a local date and time read as UTC
    pub end_date: Option<String>,
    /// Defaults to `true`
    pub is_active: Option<bool>,
    pub display_options: Option<DisplayOptionsInput>,
    pub urgency_settings: Option<UrgencySettingsInput>,
}

impl CreateTimerRequest {
    /// Check presence and parse the dates.
    ///
    /// Content rules (lengths, ordering, colours) are left to the service.
    pub(crate) fn into_new_timer(self) -> Result<NewTimer, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = required(self.title, "title", TITLE_REQUIRED, &mut errors);
        let description = required(
            self.description,
            "description",
            DESCRIPTION_REQUIRED,
            &mut errors,
        );

        let starts_at = required(
            self.start_date,
            "startDate",
            START_DATE_REQUIRED,
            &mut errors,
        )
        .and_then(|value| parse_date(&value, "startDate", START_DATE_INVALID, &mut errors));

        let ends_at = required(self.end_date, "endDate", END_DATE_REQUIRED, &mut errors)
            .and_then(|value| parse_date(&value, "endDate", END_DATE_INVALID, &mut errors));

        let display_options = self
            .display_options
            .unwrap_or_default()
            .resolve(&mut errors);

        let urgency_settings = self
            .urgency_settings
            .unwrap_or_default()
            .resolve(&mut errors);

        match (title, description, starts_at, ends_at) {
            (Some(title), Some(description), Some(starts_at), Some(ends_at))
                if errors.is_empty() =>
            {
                Ok(NewTimer {
                    title,
                    description,
                    starts_at,
                    ends_at,
                    is_active: self.is_active.unwrap_or(true),
                    display_options,
                    urgency_settings,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Update Timer Request
///
/// Omitted fields keep their stored values. Nested settings replace the stored
/// settings as a whole.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UpdateTimerRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// RFC 3339 timestamp, or a local date and time read as UTC
    pub start_date: Option<String>,
    /// RFC 3339 timestamp, or a local date and time read as UTC
    pub end_date: Option<String>,
    pub is_active: Option<bool>,
    pub display_options: Option<DisplayOptionsInput>,
    pub urgency_settings: Option<UrgencySettingsInput>,
}

impl UpdateTimerRequest {
    /// Parse the supplied dates and resolve nested settings.
    pub(crate) fn into_timer_update(self) -> Result<TimerUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let starts_at = self
            .start_date
            .and_then(|value| parse_date(&value, "startDate", START_DATE_INVALID, &mut errors));

        let ends_at = self
            .end_date
            .and_then(|value| parse_date(&value, "endDate", END_DATE_INVALID, &mut errors));

        let display_options = self
            .display_options
            .map(|input| input.resolve(&mut errors));

        let urgency_settings = self
            .urgency_settings
            .map(|input| input.resolve(&mut errors));

        errors.into_result()?;

        Ok(TimerUpdate {
            title: self.title,
            description: self.description,
            starts_at,
            ends_at,
            is_active: self.is_active,
            display_options,
            urgency_settings,
        })
    }
}

fn required<T>(
    value: Option<T>,
    field: &'static str,
    message: &'static str,
    errors: &mut ValidationErrors,
) -> Option<T> {
    if value.is_none() {
        errors.push(field, message);
    }

    value
}

/// Admin forms post `datetime-local` values such as `2026-03-01T10:00`, which
/// carry no offset. Those are read as UTC.
fn parse_date(
    value: &str,
    field: &'static str,
    message: &'static str,
    errors: &mut ValidationErrors,
) -> Option<Timestamp> {
    let value = value.trim();
    let parsed = value.parse::<Timestamp>().ok().or_else(|| {
        value
            .parse::<DateTime>()
            .and_then(|local| local.to_zoned(TimeZone::UTC))
            .map(|zoned| zoned.timestamp())
            .ok()
    });

    if parsed.is_none() {
        errors.push(field, message);
    }

    parsed
}
