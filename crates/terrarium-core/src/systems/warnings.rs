//! Probabilistic keeper warnings raised during the tick.
//!
//! Each warning only rolls when its condition holds, so a healthy dragon
//! consumes no randomness here.

use terrarium_logic::constants::warnings;
use terrarium_logic::environment::EnvironmentReport;
use terrarium_logic::rng::RandomSource;

use super::events::{ReportLevel, ReportLog, Topic};
use crate::components::Creature;

pub fn warning_system(
    creature: &Creature,
    environment: &EnvironmentReport,
    rng: &mut dyn RandomSource,
    log: &mut ReportLog,
    now_ms: u64,
) {
    let name = &creature.name;
    let vitals = &creature.vitals;

    if vitals.hunger < warnings::HUNGER_BELOW && rng.chance(warnings::VITAL_CHANCE) {
        log.message(now_ms, ReportLevel::Danger, Topic::Hunger, format!("{name} is very hungry!"));
        log.notify(now_ms, ReportLevel::Danger, Topic::Hunger, "Your dragon is starving!");
    }

    if vitals.hydration < warnings::HYDRATION_BELOW && rng.chance(warnings::VITAL_CHANCE) {
        log.message(now_ms, ReportLevel::Danger, Topic::Hydration, format!("{name} is dehydrated!"));
    }

    if vitals.health < warnings::HEALTH_BELOW && rng.chance(warnings::VITAL_CHANCE) {
        log.message(
            now_ms,
            ReportLevel::Danger,
            Topic::Health,
            format!("{name} needs medical attention!"),
        );
        log.notify(now_ms, ReportLevel::Danger, Topic::Health, "Your dragon's health is critical!");
    }

    if let Some(issue) = environment.first_issue_message() {
        if rng.chance(warnings::ENVIRONMENT_CHANCE) {
            log.message(now_ms, ReportLevel::Warning, Topic::Environment, issue);
        }
    }
}
