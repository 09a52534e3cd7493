//! Needs system - per-tick decay, mood and the sleep cycle.

use terrarium_logic::constants::temperament;
use terrarium_logic::environment::EnvironmentReport;
use terrarium_logic::needs::{decay_step, DecayInput, DecayOutcome};

use crate::components::{Creature, Habitat};

/// Decay vitals and tank cleanliness by `dt` seconds.
pub fn needs_system(
    creature: &mut Creature,
    habitat: &mut Habitat,
    environment: &EnvironmentReport,
    dt: f32,
) -> DecayOutcome {
    let outcome = decay_step(
        &creature.vitals,
        &DecayInput {
            dt,
            stage: creature.stage(),
            environment_score: environment.score,
            cleanliness: habitat.cleanliness,
        },
    );
    creature.vitals = outcome.vitals;
    habitat.set_cleanliness(outcome.cleanliness);
    outcome
}

/// A sleep-state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepChange {
    FellAsleep,
    WokeUp,
}

/// Contented dragons sleep at night; everyone wakes at dawn.
pub fn sleep_system(creature: &mut Creature, night: bool) -> Option<SleepChange> {
    if night && !creature.asleep && creature.vitals.happiness > temperament::SLEEP_HAPPINESS {
        creature.asleep = true;
        Some(SleepChange::FellAsleep)
    } else if !night && creature.asleep {
        creature.asleep = false;
        Some(SleepChange::WokeUp)
    } else {
        None
    }
}
