//! Terrarium Core - bearded dragon session engine
//!
//! Owns one virtual dragon and its enclosure, and drives them through a
//! discrete-event clock. Pure rules (decay, growth, environment scoring,
//! decisions) live in `terrarium_logic`; this crate adds state, timing,
//! keeper actions, reports and persistence.
//!
//! # Architecture
//!
//! - **Components**: plain data (creature, habitat, locomotion)
//! - **Systems**: functions over components (needs, movement, behavior,
//!   warnings, report log, timer queue)
//! - **Session**: owns everything and advances time
//!
//! # Example
//!
//! ```rust,no_run
//! use terrarium_core::prelude::*;
//!
//! let mut session = Session::new(SimConfig::default(), MemoryStore::new(), 0)
//!     .expect("default config is valid");
//! session.start("Spike", ColorMorph::Normal);
//!
//! loop {
//!     session.advance(16);
//!     for report in session.drain_reports() {
//!         println!("{}", report.text);
//!     }
//! }
//! ```

pub mod actions;
pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::config::SimConfig;
    pub use crate::engine::{LoadSummary, Session, SessionState};
    pub use crate::error::{ActionError, ActionResult, SaveError};
    pub use crate::persistence::{FileStore, MemoryStore, SaveFormat, SaveStore};
    pub use crate::systems::{Cue, CueKind, Report, ReportKind, ReportLevel, ReportSink, Topic};
    pub use terrarium_logic::actions::{FoodKind, HandleOutcome};
    pub use terrarium_logic::environment::Environment;
    pub use terrarium_logic::growth::GrowthStage;
    pub use terrarium_logic::movement::Position;
    pub use terrarium_logic::needs::{Mood, Vitals};
}
