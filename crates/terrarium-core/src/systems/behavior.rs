//! Behavior system - throttled autonomous decisions.

use log::debug;
use terrarium_logic::behavior::{decide, BehaviorInput, Decision};
use terrarium_logic::environment::Environment;
use terrarium_logic::rng::RandomSource;

use crate::components::Creature;

/// Polls the decision procedure at most once per interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BehaviorPlanner {
    interval_ms: u64,
    last_check_ms: u64,
}

impl BehaviorPlanner {
    pub fn new(interval_ms: u64, now_ms: u64) -> Self {
        Self {
            interval_ms,
            last_check_ms: now_ms,
        }
    }

    pub fn last_check_ms(&self) -> u64 {
        self.last_check_ms
    }

    /// Pick a destination if the dragon is free to move and the interval has
    /// elapsed. Skipped polls (asleep, walking) do not restart the interval.
    pub fn poll(
        &mut self,
        creature: &Creature,
        environment: Environment,
        rng: &mut dyn RandomSource,
        now_ms: u64,
    ) -> Option<Decision> {
        if creature.asleep || creature.is_moving() {
            return None;
        }
        if now_ms.saturating_sub(self.last_check_ms) < self.interval_ms {
            return None;
        }
        self.last_check_ms = now_ms;

        let input = BehaviorInput {
            hunger: creature.vitals.hunger,
            hydration: creature.vitals.hydration,
            happiness: creature.vitals.happiness,
            environment,
            current: creature.position(),
        };
        let decision = decide(&input, rng);
        if let Some(d) = decision {
            debug!("{} decided on {:?} (priority {})", creature.name, d.target, d.priority);
        }
        decision
    }
}
