//! Test Helpers

use jiff::Timestamp;

use crate::domain::timers::{
    data::NewTimer,
    display::{DisplayOptions, UrgencySettings},
};

/// An enabled timer with default display settings over the given window.
pub(crate) fn new_timer(starts_at: Timestamp, ends_at: Timestamp) -> NewTimer {
    NewTimer {
        title: "Sale".to_string(),
        description: "d".to_string(),
        starts_at,
        ends_at,
        is_active: true,
        display_options: DisplayOptions::default(),
        urgency_settings: UrgencySettings::default(),
    }
}
