//! Terrarium layout and move timing.
//!
//! Positions are fixed for the lifetime of a session. Coordinates use the
//! enclosure's layout space: `x` is percent of tank width from the left,
//! `y` is height above the substrate.

use serde::{Deserialize, Serialize};

use crate::constants::timing::{MIN_MOVE_MS, MOVE_MS_PER_UNIT};

/// A named location inside the terrarium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    Basking,
    CoolSide,
    Hide,
    Food,
    Water,
    Center,
}

/// 2-D layout coordinates of a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ALL: [Position; 6] = [
        Position::Basking,
        Position::CoolSide,
        Position::Hide,
        Position::Food,
        Position::Water,
        Position::Center,
    ];

    pub fn coords(self) -> Coords {
        let (x, y) = match self {
            Position::Basking => (75.0, 110.0),
            Position::CoolSide => (15.0, 100.0),
            Position::Hide => (8.0, 95.0),
            Position::Food => (55.0, 100.0),
            Position::Water => (25.0, 100.0),
            Position::Center => (45.0, 105.0),
        };
        Coords { x, y }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Position::Basking => "basking rock",
            Position::CoolSide => "cool side",
            Position::Hide => "hide cave",
            Position::Food => "food dish",
            Position::Water => "water dish",
            Position::Center => "center",
        }
    }
}

/// Every position except `current`, in layout order.
pub fn other_positions(current: Position) -> Vec<Position> {
    Position::ALL
        .into_iter()
        .filter(|p| *p != current)
        .collect()
}

/// How long a walk from `from` to `to` takes, in milliseconds.
///
/// Only horizontal distance matters; short hops still take [`MIN_MOVE_MS`].
pub fn move_duration_ms(from: Position, to: Position) -> u64 {
    let dx = (to.coords().x - from.coords().x).abs();
    ((dx * MOVE_MS_PER_UNIT).round() as u64).max(MIN_MOVE_MS)
}

/// Whether the walk from `from` to `to` heads left (renderers flip the sprite).
pub fn faces_left(from: Position, to: Position) -> bool {
    to.coords().x < from.coords().x
}
