//! Tuning constants - timings, decay rates, thresholds, environment ranges.
//!
//! Plain `pub const`s grouped by concern. Both the session engine and the
//! headless harness read these; nothing here depends on a clock or a renderer.

/// Wall-clock timings, in milliseconds unless noted otherwise.
pub mod timing {
    /// Period of the main simulation tick.
    pub const TICK_MS: u64 = 1_000;
    /// Minimum gap between two autonomous behavior decisions.
    pub const BEHAVIOR_POLL_MS: u64 = 3_000;
    /// Period of the cosmetic idle-animation timer.
    pub const IDLE_ANIMATION_MS: u64 = 4_000;
    /// Real seconds that make up one in-game day.
    pub const SECONDS_PER_GAME_DAY: f64 = 120.0;
    /// Autosave cadence in whole seconds of creature age.
    pub const AUTOSAVE_EVERY_SECS: u64 = 30;
    /// Minimum gap between two handling sessions.
    pub const HANDLE_COOLDOWN_MS: u64 = 30_000;
    /// Pause before a stressed creature runs to its hide.
    pub const STRESS_RETREAT_DELAY_MS: u64 = 500;
    /// Pause between the legs of a play sequence.
    pub const PLAY_STEP_PAUSE_MS: u64 = 500;
    /// Shortest possible move.
    pub const MIN_MOVE_MS: u64 = 800;
    /// Move duration per unit of horizontal distance.
    pub const MOVE_MS_PER_UNIT: f32 = 30.0;
    /// Away time (seconds) after which a load reports how long the keeper was gone.
    pub const AWAY_NOTICE_SECS: f32 = 60.0;
}

/// Day/night cycle.
pub mod cycle {
    /// Cycle units gained per real second (a full cycle is 100 units).
    pub const RATE_PER_SEC: f32 = 0.5;
    /// Cycle length.
    pub const LENGTH: f32 = 100.0;
    /// Cycle values strictly above this are night.
    pub const NIGHT_START: f32 = 50.0;
}

/// Stat decay rates and the thresholds that feed back into health.
pub mod decay {
    /// Base decay per real second.
    pub const BASE_PER_SEC: f32 = 0.1;
    /// Hunger multiplier for babies.
    pub const BABY_HUNGER_MULT: f32 = 2.0;
    pub const HYDRATION_MULT: f32 = 0.5;
    /// Happiness multiplier when the environment score is poor.
    pub const HAPPINESS_POOR_ENV_MULT: f32 = 2.0;
    pub const HAPPINESS_MULT: f32 = 0.5;
    pub const CLEANLINESS_MULT: f32 = 0.05;

    pub const POOR_ENV_SCORE: i32 = 50;
    pub const GOOD_ENV_SCORE: i32 = 80;
    pub const POOR_ENV_HEALTH_MULT: f32 = 0.5;
    pub const GOOD_ENV_HEALTH_MULT: f32 = 0.1;

    pub const LOW_HUNGER: f32 = 20.0;
    pub const LOW_HYDRATION: f32 = 20.0;
    pub const STARVING_HEALTH_MULT: f32 = 0.3;
    pub const DEHYDRATED_HEALTH_MULT: f32 = 0.3;
    pub const DIRTY_TANK: f32 = 30.0;
    pub const DIRTY_TANK_HEALTH_MULT: f32 = 0.2;

    /// Catch-up decay applied on load, per second away.
    pub const CATCH_UP_PER_SEC: f32 = 0.01;
    /// Cap on catch-up decay.
    pub const CATCH_UP_CAP: f32 = 20.0;
    pub const CATCH_UP_HYDRATION_MULT: f32 = 0.5;
    pub const CATCH_UP_HAPPINESS_MULT: f32 = 0.3;
}

/// Optimal husbandry ranges and their penalties.
pub mod husbandry {
    pub const BASKING_MIN: i32 = 95;
    pub const BASKING_MAX: i32 = 110;
    pub const COOL_MIN: i32 = 75;
    pub const COOL_MAX: i32 = 85;
    pub const HUMIDITY_MIN: i32 = 30;
    pub const HUMIDITY_MAX: i32 = 40;
    /// Tank cleanliness below this counts as an environment issue.
    pub const CLEANLINESS_MIN: f32 = 50.0;

    pub const BASKING_COLD_PENALTY: i32 = 20;
    pub const BASKING_HOT_PENALTY: i32 = 25;
    pub const COOL_COLD_PENALTY: i32 = 15;
    pub const COOL_WARM_PENALTY: i32 = 15;
    pub const HUMIDITY_LOW_PENALTY: i32 = 10;
    pub const HUMIDITY_HIGH_PENALTY: i32 = 20;
    pub const UVB_OFF_PENALTY: i32 = 30;
    pub const DIRTY_TANK_PENALTY: i32 = 15;

    /// Average of both sides below which the creature seeks heat.
    pub const COLD_AVERAGE: f32 = 80.0;
}

/// Per-tick warning thresholds and their chance of being reported.
pub mod warnings {
    pub const HUNGER_BELOW: f32 = 15.0;
    pub const HYDRATION_BELOW: f32 = 15.0;
    pub const HEALTH_BELOW: f32 = 30.0;
    pub const VITAL_CHANCE: f64 = 0.01;
    pub const ENVIRONMENT_CHANCE: f64 = 0.005;
}

/// Sleep and stress thresholds.
pub mod temperament {
    /// Happiness required to fall asleep at night.
    pub const SLEEP_HAPPINESS: f32 = 30.0;
    /// Happiness below which the creature retreats to its hide.
    pub const HIDE_HAPPINESS: f32 = 30.0;
    /// Hunger below which the creature heads for the food dish.
    pub const SEEK_FOOD_HUNGER: f32 = 20.0;
    /// Hydration below which the creature heads for the water dish.
    pub const SEEK_WATER_HYDRATION: f32 = 25.0;
    /// Happiness above which a head bob is assertive (more bobs).
    pub const ASSERTIVE_HAPPINESS: f32 = 70.0;
}

/// Starting values for a freshly hatched creature.
pub mod hatchling {
    pub const HEALTH: f32 = 100.0;
    pub const HUNGER: f32 = 80.0;
    pub const HYDRATION: f32 = 100.0;
    pub const HAPPINESS: f32 = 100.0;
    pub const SIZE_INCHES: f32 = 4.0;
    pub const NAME: &str = "Spike";
}

/// Lower and upper bound shared by every vital and by tank cleanliness.
pub const STAT_MIN: f32 = 0.0;
pub const STAT_MAX: f32 = 100.0;

/// Clamp a stat into `[STAT_MIN, STAT_MAX]`.
pub fn clamp_stat(value: f32) -> f32 {
    value.clamp(STAT_MIN, STAT_MAX)
}
