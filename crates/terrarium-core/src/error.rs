//! Error types for the session engine.

use thiserror::Error;

/// Why a keeper action was turned down. Always soft: the session carries on.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("no dragon in this session yet")]
    NoCreature,

    #[error("the session is over")]
    GameOver,

    #[error("the dragon is already on the move")]
    AlreadyMoving,

    #[error("handling cooldown active ({remaining_secs:.0}s left)")]
    HandlingCooldown { remaining_secs: f32 },
}

/// Errors that can occur during save/load.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Save version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },

    #[error("Save record has a non-finite {field}")]
    InvalidRecord { field: &'static str },

    #[error("No saved game found")]
    NotFound,

    #[error("Nothing to save: no dragon in this session")]
    NoCreature,
}

/// Invalid simulation configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be greater than zero")]
    NonPositive { field: &'static str },
}

pub type ActionResult<T = ()> = std::result::Result<T, ActionError>;
