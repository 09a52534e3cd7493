//! Session state: the dragon, its enclosure, and where it is walking.
//!
//! Components are plain data. Behavior lives in systems and the session.

mod creature;
mod habitat;
mod locomotion;

pub use creature::*;
pub use habitat::*;
pub use locomotion::*;
