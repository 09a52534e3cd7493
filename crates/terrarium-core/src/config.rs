//! Session configuration - scheduler periods, cooldowns, seeding, save format.
//!
//! Gameplay tuning (decay rates, penalties, thresholds) lives in
//! `terrarium_logic::constants`; this struct only holds what a host may want
//! to change per session.

use serde::{Deserialize, Serialize};
use terrarium_logic::constants::timing;

use crate::error::ConfigError;
use crate::persistence::SaveFormat;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Main tick period.
    pub tick_ms: u64,
    /// Minimum gap between autonomous behavior decisions.
    pub behavior_poll_ms: u64,
    /// Idle animation timer period.
    pub idle_animation_ms: u64,
    /// Autosave cadence in seconds of creature age.
    pub autosave_every_secs: u64,
    /// Minimum gap between handling sessions.
    pub handle_cooldown_ms: u64,
    /// Fixed RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    /// Encoding used for the persisted save record.
    pub save_format: SaveFormat,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms: timing::TICK_MS,
            behavior_poll_ms: timing::BEHAVIOR_POLL_MS,
            idle_animation_ms: timing::IDLE_ANIMATION_MS,
            autosave_every_secs: timing::AUTOSAVE_EVERY_SECS,
            handle_cooldown_ms: timing::HANDLE_COOLDOWN_MS,
            seed: None,
            save_format: SaveFormat::Json,
        }
    }
}

impl SimConfig {
    /// Default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Reject periods that would stall the scheduler.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let periods = [
            ("tick_ms", self.tick_ms),
            ("behavior_poll_ms", self.behavior_poll_ms),
            ("idle_animation_ms", self.idle_animation_ms),
            ("autosave_every_secs", self.autosave_every_secs),
        ];
        for (field, value) in periods {
            if value == 0 {
                return Err(ConfigError::NonPositive { field });
            }
        }
        Ok(())
    }
}
