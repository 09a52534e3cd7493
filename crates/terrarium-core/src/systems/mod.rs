//! Systems - logic that operates on session state

mod behavior;
mod events;
mod movement;
mod needs;
mod schedule;
mod warnings;

pub use behavior::*;
pub use events::*;
pub use movement::*;
pub use needs::*;
pub use schedule::*;
pub use warnings::*;
