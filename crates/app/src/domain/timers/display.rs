//! Timer display and urgency settings.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest accepted urgency threshold, in minutes.
pub const MIN_URGENCY_THRESHOLD_MINUTES: u8 = 1;

/// Largest accepted urgency threshold, in minutes.
pub const MAX_URGENCY_THRESHOLD_MINUTES: u8 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplaySettingError {
    #[error("unknown timer size: {0}")]
    UnknownSize(String),

    #[error("unknown timer position: {0}")]
    UnknownPosition(String),
}

/// Widget size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl TimerSize {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl FromStr for TimerSize {
    type Err = DisplaySettingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "small" => Ok(Self::Small),
            "medium" => Ok(Self::Medium),
            "large" => Ok(Self::Large),
            other => Err(DisplaySettingError::UnknownSize(other.to_owned())),
        }
    }
}

/// Where the storefront renders the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimerPosition {
    #[default]
    Top,
    AboveCart,
    BelowTitle,
    Bottom,
}

impl TimerPosition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::AboveCart => "above-cart",
            Self::BelowTitle => "below-title",
            Self::Bottom => "bottom",
        }
    }
}

impl FromStr for TimerPosition {
    type Err = DisplaySettingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "top" => Ok(Self::Top),
            "above-cart" => Ok(Self::AboveCart),
            "below-title" => Ok(Self::BelowTitle),
            "bottom" => Ok(Self::Bottom),
            other => Err(DisplaySettingError::UnknownPosition(other.to_owned())),
        }
    }
}

/// A CSS hex colour, `#rgb` or `#rrggbb`.
///
/// Not validated on construction; see [`HexColor::is_valid`]. Values read back
/// from storage are trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        let Some(digits) = self.0.strip_prefix('#') else {
            return false;
        };

        matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl Display for HexColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storefront display options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    pub color: HexColor,
    pub background_color: HexColor,
    pub text_color: HexColor,
    pub size: TimerSize,
    pub position: TimerPosition,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            color: HexColor::new("#ff6b6b"),
            background_color: HexColor::new("#ffffff"),
            text_color: HexColor::new("#333333"),
            size: TimerSize::default(),
            position: TimerPosition::default(),
        }
    }
}

/// Urgency mode settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgencySettings {
    pub enabled: bool,
    /// Minutes before the end at which urgency mode starts.
    #[serde(rename = "threshold")]
    pub threshold_minutes: u8,
    pub pulse_color: HexColor,
    pub show_banner: bool,
}

impl Default for UrgencySettings {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_minutes: 5,
            pulse_color: HexColor::new("#ff0000"),
            show_banner: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_accepts_short_and_long_forms() {
        assert!(HexColor::new("#fff").is_valid());
        assert!(HexColor::new("#FF6b6B").is_valid());
    }

    #[test]
    fn hex_color_rejects_malformed_values() {
        for value in ["fff", "#ffff", "#ggg", "#", "", "#ff6b6b0", "red"] {
            assert!(!HexColor::new(value).is_valid(), "{value:?} should be invalid");
        }
    }

    #[test]
    fn defaults_are_valid_colors() {
        let display = DisplayOptions::default();
        let urgency = UrgencySettings::default();

        for color in [
            &display.color,
            &display.background_color,
            &display.text_color,
            &urgency.pulse_color,
        ] {
            assert!(color.is_valid(), "default {color} should be valid");
        }
    }

    #[test]
    fn position_parses_kebab_case() {
        assert_eq!("above-cart".parse(), Ok(TimerPosition::AboveCart));
        assert_eq!("below-title".parse(), Ok(TimerPosition::BelowTitle));
        assert!("middle".parse::<TimerPosition>().is_err());
    }
}
