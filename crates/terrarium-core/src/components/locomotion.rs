//! Where the dragon is, and the walk it is on (if any).

use serde::{Deserialize, Serialize};
use terrarium_logic::movement::{move_duration_ms, Position};

/// What happens when a walk ends. Continuations are data, not closures, so
/// an in-flight walk can be saved and replayed deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arrival {
    /// Nothing further.
    Settle,
    /// Eat at the food dish.
    Eat,
    /// Drink at the water dish.
    Drink,
    /// Autonomous decision of the given priority band.
    Wander { priority: u8 },
    /// One leg of a play sequence.
    PlayLeg { leg: usize },
}

/// A walk between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Travel {
    pub from: Position,
    pub to: Position,
    pub departed_ms: u64,
    pub arrives_ms: u64,
    pub arrival: Arrival,
}

impl Travel {
    pub fn new(from: Position, to: Position, now_ms: u64, arrival: Arrival) -> Self {
        Self {
            from,
            to,
            departed_ms: now_ms,
            arrives_ms: now_ms + move_duration_ms(from, to),
            arrival,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.arrives_ms - self.departed_ms
    }

    /// Fraction of the walk completed at `now_ms`, in `[0, 1]`.
    pub fn progress(&self, now_ms: u64) -> f32 {
        let duration = self.duration_ms();
        if duration == 0 {
            return 1.0;
        }
        let elapsed = now_ms.saturating_sub(self.departed_ms).min(duration);
        elapsed as f32 / duration as f32
    }
}

/// Position state machine: stationary at a position, or travelling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Locomotion {
    /// Last position reached.
    pub position: Position,
    /// Walk in progress.
    pub travel: Option<Travel>,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self::at(Position::Basking)
    }
}

impl Locomotion {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            travel: None,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.travel.is_some()
    }

    /// Destination of the walk in progress.
    pub fn target(&self) -> Option<Position> {
        self.travel.map(|t| t.to)
    }

    /// Drop any walk in progress without moving.
    pub fn settle(&mut self) {
        self.travel = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_travel_timing() {
        let t = Travel::new(Position::Basking, Position::CoolSide, 1_000, Arrival::Settle);
        assert_eq!(t.duration_ms(), 1_800);
        assert_eq!(t.arrives_ms, 2_800);
        assert_eq!(t.progress(1_000), 0.0);
        assert_eq!(t.progress(1_900), 0.5);
        assert_eq!(t.progress(10_000), 1.0);
    }

    #[test]
    fn test_locomotion_target() {
        let mut loco = Locomotion::default();
        assert_eq!(loco.position, Position::Basking);
        assert!(!loco.is_moving());

        loco.travel = Some(Travel::new(Position::Basking, Position::Hide, 0, Arrival::Settle));
        assert!(loco.is_moving());
        assert_eq!(loco.target(), Some(Position::Hide));

        loco.settle();
        assert_eq!(loco.position, Position::Basking);
        assert_eq!(loco.target(), None);
    }
}
