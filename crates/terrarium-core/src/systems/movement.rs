//! Movement system - starts and completes walks between terrarium positions.
//!
//! A walk is state on the creature ([`Travel`]), so completing one is a plain
//! transition driven by the session clock rather than a callback.

use log::debug;
use terrarium_logic::movement::Position;

use crate::components::{Arrival, Creature, Travel};

/// Outcome of asking the dragon to walk somewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveRequest {
    /// Walk started; the arrival runs when it completes.
    Started(Travel),
    /// Already at the target; the caller runs the arrival right away.
    AlreadyThere(Arrival),
    /// Already walking. Commands do not queue.
    Busy,
    /// Sleeping dragons stay put.
    Asleep,
}

/// Start a walk to `target` if the dragon is awake and stationary.
pub fn request_move(creature: &mut Creature, target: Position, now_ms: u64, arrival: Arrival) -> MoveRequest {
    if creature.is_moving() {
        return MoveRequest::Busy;
    }
    if creature.asleep {
        return MoveRequest::Asleep;
    }
    let from = creature.position();
    if from == target {
        return MoveRequest::AlreadyThere(arrival);
    }

    let travel = Travel::new(from, target, now_ms, arrival);
    debug!(
        "{} walking {:?} -> {:?} ({} ms)",
        creature.name,
        from,
        target,
        travel.duration_ms()
    );
    creature.locomotion.travel = Some(travel);
    MoveRequest::Started(travel)
}

/// When the current walk will end.
pub fn next_arrival(creature: &Creature) -> Option<u64> {
    creature.locomotion.travel.map(|t| t.arrives_ms)
}

/// Finish the current walk if it is due. Returns the completed walk.
pub fn complete_move(creature: &mut Creature, now_ms: u64) -> Option<Travel> {
    let travel = creature.locomotion.travel?;
    if now_ms < travel.arrives_ms {
        return None;
    }
    creature.locomotion.position = travel.to;
    creature.locomotion.travel = None;
    debug!("{} arrived at {:?}", creature.name, travel.to);
    Some(travel)
}
