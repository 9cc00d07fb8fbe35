//! Numeric tables: defaults, qualitative levels, duration keywords, and
//! physical limits. All values are constants; the compiler has no
//! configuration surface.

use crate::ast::{DurationLevel, QualLevel};

/// Default rotation strength in degrees (turn, look, tilt).
pub(crate) const DEFAULT_ANGLE_DEG: f64 = 30.0;
/// Default head translation in millimeters.
pub(crate) const DEFAULT_DISTANCE_MM: f64 = 10.0;
/// Default antenna angle in degrees.
pub(crate) const DEFAULT_ANTENNA_DEG: f64 = 45.0;
/// Default movement duration in seconds.
pub(crate) const DEFAULT_DURATION_SEC: f64 = 1.0;

/// Which physical quantity a strength value feeds. Picks the qualitative
/// column and the default; the same word resolves differently per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StrengthContext {
    BodyYaw,
    HeadPitchRoll,
    HeadYaw,
    Translation,
    Antenna,
}

pub(crate) fn default_strength(context: StrengthContext) -> f64 {
    match context {
        StrengthContext::BodyYaw | StrengthContext::HeadPitchRoll | StrengthContext::HeadYaw => {
            DEFAULT_ANGLE_DEG
        }
        StrengthContext::Translation => DEFAULT_DISTANCE_MM,
        StrengthContext::Antenna => DEFAULT_ANTENNA_DEG,
    }
}

/// Context-aware qualitative table. Degrees, except millimeters for
/// translations.
pub(crate) fn qualitative_strength(context: StrengthContext, level: QualLevel) -> f64 {
    use QualLevel::*;
    match context {
        StrengthContext::BodyYaw => match level {
            VerySmall => 10.0,
            Small => 30.0,
            Medium => 60.0,
            Large => 90.0,
            VeryLarge => 120.0,
        },
        StrengthContext::HeadPitchRoll => match level {
            VerySmall => 5.0,
            Small => 10.0,
            Medium => 20.0,
            Large => 30.0,
            VeryLarge => 38.0,
        },
        StrengthContext::HeadYaw => match level {
            VerySmall => 5.0,
            Small => 15.0,
            Medium => 30.0,
            Large => 45.0,
            VeryLarge => 60.0,
        },
        StrengthContext::Translation => match level {
            VerySmall => 2.0,
            Small => 5.0,
            Medium => 10.0,
            Large => 20.0,
            VeryLarge => 28.0,
        },
        StrengthContext::Antenna => match level {
            VerySmall => 10.0,
            Small => 30.0,
            Medium => 60.0,
            Large => 90.0,
            VeryLarge => 110.0,
        },
    }
}

pub(crate) fn duration_keyword_seconds(level: DurationLevel) -> f64 {
    match level {
        DurationLevel::SuperFast => 0.2,
        DurationLevel::Fast => 0.5,
        DurationLevel::Slow => 2.0,
        DurationLevel::SuperSlow => 3.0,
    }
}

// Warn thresholds from the robot's physical constraints. Exceeding one
// records a warning; the IR keeps the requested value and the adapter or
// hardware clamps.
pub(crate) const MAX_BODY_YAW_DEG: f64 = 160.0;
pub(crate) const MAX_HEAD_PITCH_DEG: f64 = 40.0;
pub(crate) const MAX_HEAD_ROLL_DEG: f64 = 40.0;
/// Head yaw relative to the body.
pub(crate) const MAX_HEAD_YAW_DEG: f64 = 65.0;
pub(crate) const MAX_HEAD_TRANSLATION_X_MM: f64 = 30.0;
pub(crate) const MAX_HEAD_TRANSLATION_Y_MM: f64 = 30.0;
pub(crate) const MAX_HEAD_TRANSLATION_Z_UP_MM: f64 = 20.0;
pub(crate) const MAX_HEAD_TRANSLATION_Z_DOWN_MM: f64 = 40.0;
/// Recommended antenna range; the physical ceiling is 180° and clock
/// targets normalize inside it.
pub(crate) const SAFE_ANTENNA_DEG: f64 = 65.0;
/// Durations below this produce a jerky-motion warning.
pub(crate) const MIN_SMOOTH_DURATION_SEC: f64 = 0.1;
