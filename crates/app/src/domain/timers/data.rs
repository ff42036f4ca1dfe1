//! Timer Data
//!
//! Inputs accepted by the timers service. Both types are validated with an
//! explicit call that returns the normalised value or every field error found.

use jiff::Timestamp;

use crate::domain::timers::{
    display::{
        DisplayOptions, MAX_URGENCY_THRESHOLD_MINUTES, MIN_URGENCY_THRESHOLD_MINUTES,
        UrgencySettings,
    },
    validation::ValidationErrors,
};

/// Longest accepted title, in characters.
pub const MAX_TITLE_LEN: usize = 100;

/// Longest accepted description, in characters.
pub const MAX_DESCRIPTION_LEN: usize = 500;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const TITLE_TOO_LONG: &str = "Title cannot exceed 100 characters";
pub const DESCRIPTION_REQUIRED: &str = "Description is required";
pub const DESCRIPTION_TOO_LONG: &str = "Description cannot exceed 500 characters";
pub const START_DATE_REQUIRED: &str = "Start date is required";
pub const END_DATE_REQUIRED: &str = "End date is required";
pub const START_DATE_INVALID: &str = "Start date must be a valid date and time";
pub const END_DATE_INVALID: &str = "End date must be a valid date and time";
pub const END_BEFORE_START: &str = "End date must be after start date";
pub const END_IN_PAST: &str = "End date must be in the future";
pub const INVALID_COLOR: &str = "Color must be a valid hex color";
pub const INVALID_BACKGROUND_COLOR: &str = "Background color must be a valid hex color";
pub const INVALID_TEXT_COLOR: &str = "Text color must be a valid hex color";
pub const INVALID_PULSE_COLOR: &str = "Pulse color must be a valid hex color";
pub const INVALID_THRESHOLD: &str = "Urgency threshold must be between 1 and 60 minutes";
pub const INVALID_SIZE: &str = "Size must be one of small, medium or large";
pub const INVALID_POSITION: &str = "Position must be one of top, above-cart, below-title or bottom";

/// New Timer Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewTimer {
    pub title: String,
    pub description: String,
    pub starts_at: Timestamp,
    pub ends_at: Timestamp,
    pub is_active: bool,
    pub display_options: DisplayOptions,
    pub urgency_settings: UrgencySettings,
}

impl NewTimer {
    /// Trim text fields and check every constraint a new timer must meet.
    ///
    /// # Errors
    ///
    /// Returns all field errors when any check fails, including an end date
    /// that is not after the start date or not after `now`.
    pub fn validate(self, now: Timestamp) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = check_title(&self.title, &mut errors);
        let description = check_description(&self.description, &mut errors);

        check_window(self.starts_at, self.ends_at, &mut errors);

        if self.ends_at <= now {
            errors.push("endDate", END_IN_PAST);
        }

        check_display_options(&self.display_options, &mut errors);
        check_urgency_settings(&self.urgency_settings, &mut errors);

        errors.into_result()?;

        Ok(Self {
            title,
            description,
            ..self
        })
    }
}

/// Timer Update Data
///
/// `None` leaves the stored value untouched. Nested settings are replaced as a
/// whole.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimerUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<Timestamp>,
    pub ends_at: Option<Timestamp>,
    pub is_active: Option<bool>,
    pub display_options: Option<DisplayOptions>,
    pub urgency_settings: Option<UrgencySettings>,
}

impl TimerUpdate {
    /// Check the supplied fields.
    ///
    /// Date ordering is only checked when both dates are supplied; a lone date
    /// is never compared against the stored counterpart.
    ///
    /// # Errors
    ///
    /// Returns all field errors when any supplied field is invalid.
    pub fn validate(self) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = self
            .title
            .as_deref()
            .map(|title| check_title(title, &mut errors));

        let description = self
            .description
            .as_deref()
            .map(|description| check_description(description, &mut errors));

        if let (Some(starts_at), Some(ends_at)) = (self.starts_at, self.ends_at) {
            check_window(starts_at, ends_at, &mut errors);
        }

        if let Some(display_options) = &self.display_options {
            check_display_options(display_options, &mut errors);
        }

        if let Some(urgency_settings) = &self.urgency_settings {
            check_urgency_settings(urgency_settings, &mut errors);
        }

        errors.into_result()?;

        Ok(Self {
            title,
            description,
            ..self
        })
    }
}

fn check_title(title: &str, errors: &mut ValidationErrors) -> String {
    let title = title.trim();

    if title.is_empty() {
        errors.push("title", TITLE_REQUIRED);
    } else if title.chars().count() > MAX_TITLE_LEN {
        errors.push("title", TITLE_TOO_LONG);
    }

    title.to_owned()
}

fn check_description(description: &str, errors: &mut ValidationErrors) -> String {
    let description = description.trim();

    if description.is_empty() {
        errors.push("description", DESCRIPTION_REQUIRED);
    } else if description.chars().count() > MAX_DESCRIPTION_LEN {
        errors.push("description", DESCRIPTION_TOO_LONG);
    }

    description.to_owned()
}

fn check_window(starts_at: Timestamp, ends_at: Timestamp, errors: &mut ValidationErrors) {
    if starts_at >= ends_at {
        errors.push("endDate", END_BEFORE_START);
    }
}

fn check_display_options(display_options: &DisplayOptions, errors: &mut ValidationErrors) {
    for (field, color, message) in [
        ("displayOptions.color", &display_options.color, INVALID_COLOR),
        (
            "displayOptions.backgroundColor",
            &display_options.background_color,
            INVALID_BACKGROUND_COLOR,
        ),
        (
            "displayOptions.textColor",
            &display_options.text_color,
            INVALID_TEXT_COLOR,
        ),
    ] {
        if !color.is_valid() {
            errors.push(field, message);
        }
    }
}

fn check_urgency_settings(urgency_settings: &UrgencySettings, errors: &mut ValidationErrors) {
    if !(MIN_URGENCY_THRESHOLD_MINUTES..=MAX_URGENCY_THRESHOLD_MINUTES)
        .contains(&urgency_settings.threshold_minutes)
    {
        errors.push("urgencySettings.threshold", INVALID_THRESHOLD);
    }

    if !urgency_settings.pulse_color.is_valid() {
        errors.push("urgencySettings.pulseColor", INVALID_PULSE_COLOR);
    }
}
