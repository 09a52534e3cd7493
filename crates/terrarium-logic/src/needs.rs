//! Needs decay engine - per-tick vital decay, environment-driven health
//! effects, load-time catch-up decay and the derived mood label.
//!
//! Vitals are "fullness" values: 100 is satisfied, 0 is depleted. Every
//! mutation here goes through [`clamp_stat`], so callers never have to
//! re-validate ranges.

use serde::{Deserialize, Serialize};

use crate::constants::{clamp_stat, decay, hatchling};
use crate::growth::GrowthStage;

/// The four bounded vitals of a creature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub health: f32,
    pub hunger: f32,
    pub hydration: f32,
    pub happiness: f32,
}

impl Default for Vitals {
    fn default() -> Self {
        Self {
            health: hatchling::HEALTH,
            hunger: hatchling::HUNGER,
            hydration: hatchling::HYDRATION,
            happiness: hatchling::HAPPINESS,
        }
    }
}

/// Signed change to each vital. Applied with clamping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VitalsDelta {
    pub health: f32,
    pub hunger: f32,
    pub hydration: f32,
    pub happiness: f32,
}

impl Vitals {
    pub fn new(health: f32, hunger: f32, hydration: f32, happiness: f32) -> Self {
        Self {
            health: clamp_stat(health),
            hunger: clamp_stat(hunger),
            hydration: clamp_stat(hydration),
            happiness: clamp_stat(happiness),
        }
    }

    /// Mean of all four vitals.
    pub fn average(&self) -> f32 {
        (self.health + self.hunger + self.hydration + self.happiness) / 4.0
    }

    /// Apply a delta, clamping every vital into range.
    pub fn apply(&mut self, delta: &VitalsDelta) {
        self.health = clamp_stat(self.health + delta.health);
        self.hunger = clamp_stat(self.hunger + delta.hunger);
        self.hydration = clamp_stat(self.hydration + delta.hydration);
        self.happiness = clamp_stat(self.happiness + delta.happiness);
    }

    /// Every vital lies in `[0, 100]`.
    pub fn in_range(&self) -> bool {
        [self.health, self.hunger, self.hydration, self.happiness]
            .iter()
            .all(|v| (0.0..=100.0).contains(v))
    }

    /// Health exhausted - the terminal condition.
    pub fn is_depleted(&self) -> bool {
        self.health <= 0.0
    }
}

/// Everything one decay step reads besides the vitals themselves.
#[derive(Debug, Clone, Copy)]
pub struct DecayInput {
    /// Elapsed real seconds.
    pub dt: f32,
    pub stage: GrowthStage,
    /// Environment score computed before this step.
    pub environment_score: i32,
    /// Tank cleanliness before this step.
    pub cleanliness: f32,
}

/// Outcome of one decay step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayOutcome {
    pub vitals: Vitals,
    pub cleanliness: f32,
    /// Net health change before clamping.
    pub health_change: f32,
}

/// Advance vitals and tank cleanliness by one tick.
pub fn decay_step(vitals: &Vitals, input: &DecayInput) -> DecayOutcome {
    let base = input.dt * decay::BASE_PER_SEC;
    let mut next = *vitals;

    let hunger_rate = if input.stage == GrowthStage::Baby {
        base * decay::BABY_HUNGER_MULT
    } else {
        base
    };
    next.hunger = clamp_stat(next.hunger - hunger_rate);
    next.hydration = clamp_stat(next.hydration - base * decay::HYDRATION_MULT);

    let poor_environment = input.environment_score < decay::POOR_ENV_SCORE;
    let happiness_rate = if poor_environment {
        decay::HAPPINESS_POOR_ENV_MULT
    } else {
        decay::HAPPINESS_MULT
    };
    next.happiness = clamp_stat(next.happiness - base * happiness_rate);

    let mut health_change = 0.0;
    if poor_environment {
        health_change -= base * decay::POOR_ENV_HEALTH_MULT;
    } else if input.environment_score > decay::GOOD_ENV_SCORE {
        health_change += base * decay::GOOD_ENV_HEALTH_MULT;
    }
    if next.hunger < decay::LOW_HUNGER {
        health_change -= base * decay::STARVING_HEALTH_MULT;
    }
    if next.hydration < decay::LOW_HYDRATION {
        health_change -= base * decay::DEHYDRATED_HEALTH_MULT;
    }

    // Cleanliness decays first; the dirty-tank check reads the decayed value.
    let cleanliness = clamp_stat(input.cleanliness - base * decay::CLEANLINESS_MULT);
    if cleanliness < decay::DIRTY_TANK {
        health_change -= base * decay::DIRTY_TANK_HEALTH_MULT;
    }

    next.health = clamp_stat(next.health + health_change);

    DecayOutcome {
        vitals: next,
        cleanliness,
        health_change,
    }
}

/// Total catch-up decay owed for `seconds_away`, capped.
pub fn catch_up_amount(seconds_away: f32) -> f32 {
    (seconds_away.max(0.0) * decay::CATCH_UP_PER_SEC).min(decay::CATCH_UP_CAP)
}

/// One-shot decay applied when a saved session is resumed.
pub fn catch_up(vitals: &Vitals, seconds_away: f32) -> Vitals {
    let amount = catch_up_amount(seconds_away);
    Vitals {
        health: vitals.health,
        hunger: clamp_stat(vitals.hunger - amount),
        hydration: clamp_stat(vitals.hydration - amount * decay::CATCH_UP_HYDRATION_MULT),
        happiness: clamp_stat(vitals.happiness - amount * decay::CATCH_UP_HAPPINESS_MULT),
    }
}

/// Derived mood label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Sleeping,
    Happy,
    Content,
    Okay,
    Unhappy,
    Distressed,
}

impl Mood {
    pub fn label(self) -> &'static str {
        match self {
            Self::Sleeping => "sleeping",
            Self::Happy => "happy",
            Self::Content => "content",
            Self::Okay => "okay",
            Self::Unhappy => "unhappy",
            Self::Distressed => "distressed",
        }
    }
}

/// Mood from the vitals average, with sleep overriding everything.
pub fn mood_for(vitals: &Vitals, asleep: bool) -> Mood {
    if asleep {
        return Mood::Sleeping;
    }
    let avg = vitals.average();
    if avg > 80.0 {
        Mood::Happy
    } else if avg > 60.0 {
        Mood::Content
    } else if avg > 40.0 {
        Mood::Okay
    } else if avg > 20.0 {
        Mood::Unhappy
    } else {
        Mood::Distressed
    }
}
