//! Autonomous behavior - a priority-banded decision procedure that picks
//! where the dragon walks next.
//!
//! Bands are evaluated from most to least urgent. Once a band fires, lower
//! bands are skipped. Random bands draw from an injected [`RandomSource`]
//! so tests can pin every branch.

use crate::constants::{husbandry, temperament};
use crate::environment::Environment;
use crate::movement::{other_positions, Position};
use crate::rng::RandomSource;

/// Priority bands, highest first.
pub mod priority {
    pub const HUNGER: u8 = 10;
    pub const THIRST: u8 = 9;
    pub const TEMPERATURE: u8 = 8;
    pub const STRESS: u8 = 7;
    pub const SHUTTLE: u8 = 5;
    pub const EXPLORE: u8 = 3;

    /// Decisions at or above this band are announced on arrival.
    pub const ANNOUNCE: u8 = 7;
}

/// Chance per poll of considering a thermoregulation shuttle.
pub const SHUTTLE_CHANCE: f64 = 0.15;
/// Chance of leaving the basking rock once a shuttle is considered.
pub const SHUTTLE_TO_COOL_CHANCE: f64 = 0.3;
/// Chance of leaving the cool side once a shuttle is considered.
pub const SHUTTLE_TO_BASK_CHANCE: f64 = 0.4;
/// Chance per poll of wandering somewhere at random.
pub const EXPLORE_CHANCE: f64 = 0.08;

/// Everything the decision procedure reads.
#[derive(Debug, Clone, Copy)]
pub struct BehaviorInput {
    pub hunger: f32,
    pub hydration: f32,
    pub happiness: f32,
    pub environment: Environment,
    pub current: Position,
}

/// A chosen destination and the band that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub target: Position,
    pub priority: u8,
}

impl Decision {
    fn new(target: Position, priority: u8) -> Self {
        Self { target, priority }
    }

    /// Whether arrival should be reported to the keeper.
    pub fn is_announced(&self) -> bool {
        self.priority >= priority::ANNOUNCE
    }
}

/// Pick the next destination, or `None` to stay put.
pub fn decide(input: &BehaviorInput, rng: &mut dyn RandomSource) -> Option<Decision> {
    let mut decision: Option<Decision> = None;
    let band = |d: &Option<Decision>| d.map(|d| d.priority).unwrap_or(0);

    if input.hunger < temperament::SEEK_FOOD_HUNGER && input.current != Position::Food {
        decision = Some(Decision::new(Position::Food, priority::HUNGER));
    }

    if input.hydration < temperament::SEEK_WATER_HYDRATION
        && input.current != Position::Water
        && band(&decision) < priority::THIRST
    {
        decision = Some(Decision::new(Position::Water, priority::THIRST));
    }

    if band(&decision) < priority::TEMPERATURE {
        let env = &input.environment;
        if env.basking_temp < husbandry::BASKING_MIN
            || env.average_temp() < husbandry::COLD_AVERAGE
        {
            if input.current != Position::Basking {
                decision = Some(Decision::new(Position::Basking, priority::TEMPERATURE));
            }
        } else if env.basking_temp > husbandry::BASKING_MAX && input.current == Position::Basking {
            decision = Some(Decision::new(Position::CoolSide, priority::TEMPERATURE));
        }
    }

    if band(&decision) < priority::STRESS
        && input.happiness < temperament::HIDE_HAPPINESS
        && input.current != Position::Hide
    {
        decision = Some(Decision::new(Position::Hide, priority::STRESS));
    }

    if band(&decision) < priority::SHUTTLE && rng.chance(SHUTTLE_CHANCE) {
        match input.current {
            Position::Basking if rng.chance(SHUTTLE_TO_COOL_CHANCE) => {
                decision = Some(Decision::new(Position::CoolSide, priority::SHUTTLE));
            }
            Position::CoolSide if rng.chance(SHUTTLE_TO_BASK_CHANCE) => {
                decision = Some(Decision::new(Position::Basking, priority::SHUTTLE));
            }
            _ => {}
        }
    }

    if band(&decision) < priority::EXPLORE && rng.chance(EXPLORE_CHANCE) {
        let candidates = other_positions(input.current);
        let target = candidates[rng.pick(candidates.len())];
        decision = Some(Decision::new(target, priority::EXPLORE));
    }

    decision
}
