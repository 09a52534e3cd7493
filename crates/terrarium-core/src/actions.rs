//! Keeper actions on a running session.
//!
//! Every action needs a live dragon in a running session. Rejections come
//! back as [`ActionError`] and never disturb the simulation.

use log::debug;

use terrarium_logic::actions::{
    bath_delta, clean_tank_delta, feed_delta, pet_delta, resolve_handling, FoodKind, HandleOutcome,
};
use terrarium_logic::constants::timing;
use terrarium_logic::movement::Position;

use crate::components::Arrival;
use crate::engine::{Session, PLAY_ROUTE};
use crate::error::{ActionError, ActionResult};
use crate::systems::{Command, CueKind, ReportLevel, Topic};

impl Session {
    /// Offer food. Stats apply at once; the dragon then walks to the dish.
    pub fn feed(&mut self, food: FoodKind) -> ActionResult {
        let stage = self.require_running()?.stage();
        let now = self.now_ms();
        let delta = feed_delta(food, stage);

        let Some(creature) = self.creature.as_mut() else {
            return Err(ActionError::NoCreature);
        };
        creature.vitals.apply(&delta);
        creature.record_meal(food.category(), now);
        let name = creature.name.clone();
        debug!("{} fed {} ({:?})", name, food.key(), stage);

        self.start_move(Position::Food, Arrival::Eat);
        self.reports.message(
            now,
            ReportLevel::Success,
            Topic::Feeding,
            format!("{name} ate {}!", food.display_name()),
        );
        Ok(())
    }

    /// Send the dragon to the water dish; it drinks on arrival.
    pub fn give_water(&mut self) -> ActionResult {
        self.require_running()?;
        self.start_move(Position::Water, Arrival::Drink);
        Ok(())
    }

    /// Pick the dragon up. Limited to once per cooldown window.
    pub fn handle(&mut self) -> ActionResult<HandleOutcome> {
        let creature = self.require_running()?;
        let stage = creature.stage();
        let name = creature.name.clone();
        let now = self.now_ms();
        let cooldown = self.config().handle_cooldown_ms;

        if let Some(last) = self.last_handled_ms {
            let elapsed = now.saturating_sub(last);
            if elapsed < cooldown {
                self.reports.message(
                    now,
                    ReportLevel::Warning,
                    Topic::Handling,
                    format!("{name} needs a break from handling."),
                );
                return Err(ActionError::HandlingCooldown {
                    remaining_secs: (cooldown - elapsed) as f32 / 1000.0,
                });
            }
        }

        let outcome = resolve_handling(stage, self.rng.roll());
        if let Some(creature) = self.creature.as_mut() {
            creature.vitals.apply(&outcome.delta());
            creature.counters.times_handled += 1;
        }
        self.last_handled_ms = Some(now);

        match outcome {
            HandleOutcome::Stressed { .. } => {
                self.reports.cue(now, CueKind::BeardPuff);
                self.reports.message(
                    now,
                    ReportLevel::Warning,
                    Topic::Handling,
                    format!("{name} got a bit stressed from handling."),
                );
                self.timers.schedule(
                    now + timing::STRESS_RETREAT_DELAY_MS,
                    Command::MoveTo {
                        target: Position::Hide,
                        arrival: Arrival::Settle,
                    },
                );
            }
            HandleOutcome::Enjoyed { .. } => {
                self.reports.message(
                    now,
                    ReportLevel::Success,
                    Topic::Handling,
                    format!("{name} enjoyed being handled!"),
                );
                self.reports.cue(now, CueKind::ArmWave);
            }
        }
        Ok(outcome)
    }

    pub fn bathe(&mut self) -> ActionResult {
        self.require_running()?;
        let now = self.now_ms();
        let Some(creature) = self.creature.as_mut() else {
            return Err(ActionError::NoCreature);
        };
        creature.vitals.apply(&bath_delta());
        let name = creature.name.clone();

        self.reports.message(
            now,
            ReportLevel::Success,
            Topic::Bath,
            format!("{name} enjoyed a warm bath!"),
        );
        self.reports.notify(
            now,
            ReportLevel::Success,
            Topic::Bath,
            "Bath time! Your dragon is clean and hydrated.",
        );
        Ok(())
    }

    pub fn clean_tank(&mut self) -> ActionResult {
        self.require_running()?;
        let now = self.now_ms();
        self.habitat.clean();
        if let Some(creature) = self.creature.as_mut() {
            creature.vitals.apply(&clean_tank_delta());
        }
        self.reports.message(
            now,
            ReportLevel::Success,
            Topic::Cleaning,
            "Tank cleaned! Environment is now spotless.",
        );
        Ok(())
    }

    /// Walk the play route with a pause between legs; the reward lands when
    /// the last leg ends.
    pub fn play(&mut self) -> ActionResult {
        if self.require_running()?.is_moving() {
            return Err(ActionError::AlreadyMoving);
        }
        self.start_move(PLAY_ROUTE[0], Arrival::PlayLeg { leg: 0 });
        Ok(())
    }

    pub fn pet(&mut self) -> ActionResult {
        self.require_running()?;
        let now = self.now_ms();
        let Some(creature) = self.creature.as_mut() else {
            return Err(ActionError::NoCreature);
        };
        let name = creature.name.clone();

        if creature.asleep {
            self.reports.message(
                now,
                ReportLevel::Info,
                Topic::Petting,
                format!("Shhh... {name} is sleeping."),
            );
        } else {
            creature.vitals.apply(&pet_delta());
            self.reports.message(
                now,
                ReportLevel::Success,
                Topic::Petting,
                format!("{name} likes the attention!"),
            );
        }
        Ok(())
    }
}
