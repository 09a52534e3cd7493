//! Idle animation selection. Purely cosmetic: no effect on the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::temperament::ASSERTIVE_HAPPINESS;

/// Chance per idle timer firing that the dragon does anything at all.
pub const IDLE_CHANCE: f64 = 0.4;

/// Small behaviors a stationary dragon shows off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdleAnimation {
    HeadBob,
    ArmWave,
    LookAround,
    TailFlick,
    TongueFlick,
}

/// Map a uniform roll onto an idle animation; `None` means stay still.
pub fn pick_idle_animation(roll: f64) -> Option<IdleAnimation> {
    if roll < 0.25 {
        Some(IdleAnimation::HeadBob)
    } else if roll < 0.4 {
        Some(IdleAnimation::ArmWave)
    } else if roll < 0.6 {
        Some(IdleAnimation::LookAround)
    } else if roll < 0.75 {
        Some(IdleAnimation::TailFlick)
    } else if roll < 0.85 {
        Some(IdleAnimation::TongueFlick)
    } else {
        None
    }
}

/// Number of head bobs: assertive dragons bob more.
pub fn head_bob_count(happiness: f32) -> u8 {
    if happiness > ASSERTIVE_HAPPINESS {
        4
    } else {
        2
    }
}
