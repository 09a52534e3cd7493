//! Pure simulation logic for Terrarium.
//!
//! This crate contains all game logic that is independent of storage,
//! rendering, or wall clocks. Functions take plain data and return results,
//! making them unit-testable and usable from the session engine, the
//! headless harness, and any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`actions`] | Nutrition table, diet effectiveness, keeper action deltas |
//! | [`behavior`] | Priority-banded decision procedure for autonomous movement |
//! | [`clock`] | Real seconds to game days, day/night cycle, UVB exposure |
//! | [`constants`] | Timings, decay rates, husbandry ranges, thresholds |
//! | [`environment`] | Environment score and ordered issue list |
//! | [`growth`] | Growth stage and size from age |
//! | [`idle`] | Cosmetic idle animation selection |
//! | [`movement`] | Terrarium positions and move timing |
//! | [`needs`] | Per-tick vital decay, catch-up decay, mood |
//! | [`rng`] | Injectable random source (seeded ChaCha or scripted) |

pub mod actions;
pub mod behavior;
pub mod clock;
pub mod constants;
pub mod environment;
pub mod growth;
pub mod idle;
pub mod movement;
pub mod needs;
pub mod rng;
