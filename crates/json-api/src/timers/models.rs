//! Timer display and urgency payloads shared by requests and responses.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use countdown_app::domain::timers::{
    data::{INVALID_POSITION, INVALID_SIZE, INVALID_THRESHOLD},
    display::{DisplayOptions, HexColor, UrgencySettings},
    validation::ValidationErrors,
};

/// Display Options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DisplayOptionsBody {
    pub color: String,
    pub background_color: String,
    pub text_color: String,
    /// `small`, `medium` or `large`
    pub size: String,
    /// `top`, `above-cart`, `below-title` or `bottom`
    pub position: String,
}

impl From<DisplayOptions> for DisplayOptionsBody {
    fn from(options: DisplayOptions) -> Self {
        Self {
            color: options.color.to_string(),
            background_color: options.background_color.to_string(),
            text_color: options.text_color.to_string(),
            size: options.size.as_str().to_string(),
            position: options.position.as_str().to_string(),
        }
    }
}

/// Display Options Input
///
/// Omitted fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DisplayOptionsInput {
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub size: Option<String>,
    pub position: Option<String>,
}

impl DisplayOptionsInput {
    /// Fill in defaults, recording unknown sizes and positions in `errors`.
    ///
    /// Colours are carried as given; the service checks them.
    pub(crate) fn resolve(self, errors: &mut ValidationErrors) -> DisplayOptions {
        let defaults = DisplayOptions::default();

        let size = match self.size.as_deref().map(str::parse) {
            None => defaults.size,
            Some(Ok(size)) => size,
            Some(Err(_unknown)) => {
                errors.push("displayOptions.size", INVALID_SIZE);

                defaults.size
            }
        };

        let position = match self.position.as_deref().map(str::parse) {
            None => defaults.position,
            Some(Ok(position)) => position,
            Some(Err(_unknown)) => {
                errors.push("displayOptions.position", INVALID_POSITION);

                defaults.position
            }
        };

        DisplayOptions {
            color: self.color.map_or(defaults.color, HexColor::new),
            background_color: self
                .background_color
                .map_or(defaults.background_color, HexColor::new),
            text_color: self.text_color.map_or(defaults.text_color, HexColor::new),
            size,
            position,
        }
    }
}

/// Urgency Settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UrgencySettingsBody {
    pub enabled: bool,
    /// Minutes before the end at which urgency mode starts
    pub threshold: u8,
    pub pulse_color: String,
    pub show_banner: bool,
}

impl From<UrgencySettings> for UrgencySettingsBody {
    fn from(settings: UrgencySettings) -> Self {
        Self {
            enabled: settings.enabled,
            threshold: settings.threshold_minutes,
            pulse_color: settings.pulse_color.to_string(),
            show_banner: settings.show_banner,
        }
    }
}

/// Urgency Settings Input
///
/// Omitted fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UrgencySettingsInput {
    pub enabled: Option<bool>,
    /// Minutes, 1 to 60
    pub threshold: Option<i64>,
    pub pulse_color: Option<String>,
    pub show_banner: Option<bool>,
}

impl UrgencySettingsInput {
    /// Fill in defaults, recording a threshold that cannot be stored in `errors`.
    pub(crate) fn resolve(self, errors: &mut ValidationErrors) -> UrgencySettings {
        let defaults = UrgencySettings::default();

        let threshold_minutes = match self.threshold.map(u8::try_from) {
            None => defaults.threshold_minutes,
            Some(Ok(threshold)) => threshold,
            Some(Err(_out_of_range)) => {
                errors.push("urgencySettings.threshold", INVALID_THRESHOLD);

                defaults.threshold_minutes
            }
        };

        UrgencySettings {
            enabled: self.enabled.unwrap_or(defaults.enabled),
            threshold_minutes,
            pulse_color: self.pulse_color.map_or(defaults.pulse_color, HexColor::new),
            show_banner: self.show_banner.unwrap_or(defaults.show_banner),
        }
    }
}
