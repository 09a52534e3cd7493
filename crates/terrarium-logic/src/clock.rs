//! Clock and age model - real seconds to game days, and the day/night cycle.

use crate::constants::{cycle, timing};

/// Whole game days lived for a given amount of accumulated real time.
pub fn game_days(real_age_secs: f64) -> u32 {
    if real_age_secs <= 0.0 {
        return 0;
    }
    (real_age_secs / timing::SECONDS_PER_GAME_DAY).floor() as u32
}

/// Advance the day/night cycle by `dt` real seconds, wrapping at the cycle length.
pub fn advance_cycle(value: f32, dt: f32) -> f32 {
    (value + dt * cycle::RATE_PER_SEC).rem_euclid(cycle::LENGTH)
}

/// Whether a cycle value falls in the night half.
pub fn is_night(value: f32) -> bool {
    value > cycle::NIGHT_START
}

/// Whether a cycle value sits in the narrow window just after the wrap,
/// where daily UVB exposure is reset.
pub fn is_midnight(value: f32) -> bool {
    value > 0.0 && value < 1.0
}

/// UVB hours gained over `dt` real seconds. Only daytime exposure counts.
pub fn uvb_hours_gained(dt: f32, uvb_on: bool, night: bool) -> f32 {
    if uvb_on && !night {
        dt / 3600.0
    } else {
        0.0
    }
}

/// Whole seconds of creature age, used for autosave cadence.
pub fn whole_seconds(real_age_secs: f64) -> u64 {
    real_age_secs.max(0.0).floor() as u64
}
