//! Error types.
//!
//! Errors fall into the four classes the engine distinguishes:
//!
//! - **Configuration** (`ConfigError`, `CatalogError`): fatal, reported before
//!   any round starts.
//! - **Invalid input**: never an error value. Out-of-range answers from a
//!   decision policy are re-asked.
//! - **Game-rule refusals** (`BuildError`, `SpendError`): the action is refused,
//!   state is untouched and the refusal is announced as an event.
//! - **Invariant violations**: assertions, not values.

use std::path::PathBuf;

use thiserror::Error;

use crate::cards::Role;
use crate::core::PlayerId;

/// Table setup problems. Fatal: no round is played.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count must be between 4 and 7, got {0}")]
    PlayerCount(usize),

    #[error("the building catalog is empty")]
    EmptyCatalog,

    #[error("human seat {seat} is outside a table of {player_count}")]
    HumanSeat { seat: usize, player_count: usize },

    #[error("expected {expected} decision policies, got {actual}")]
    SeatCount { expected: usize, actual: usize },

    #[error("win threshold must be at least 1")]
    WinThreshold,
}

/// Problems reading a tab-separated card list.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read card list {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: missing field `{field}`")]
    MissingField { line: usize, field: &'static str },

    #[error("line {line}: `{field}` is not a number: {value:?}")]
    BadNumber {
        line: usize,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: unknown color {value:?}")]
    UnknownColor { line: usize, value: String },

    #[error("line {line}: cost must be positive")]
    ZeroCost { line: usize },
}

/// Why a resource spend was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("needs {needed} gold, has {available}")]
pub struct SpendError {
    pub needed: u32,
    pub available: u32,
}

/// Why a build from hand was refused.
#[derive(Clone, Debug, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum BuildError {
    #[error("no card at hand position {0}")]
    NoSuchCard(usize),

    #[error("a district named {0:?} is already built")]
    DuplicateName(String),

    #[error("not enough gold: costs {cost}, has {gold}")]
    InsufficientGold { cost: u32, gold: u32 },
}

/// Ability resolution refusals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AbilityError {
    #[error("{player} has no role this round")]
    NoRole { player: PlayerId },

    #[error("the {role} ability was already used this round")]
    AlreadyResolved { role: Role },
}

/// Save/restore failures.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to access save file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON save: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed binary save: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("saved table has {0} players, expected 4 to 7")]
    PlayerCount(usize),

    #[error("saved crowned seat {crowned} is outside a table of {player_count}")]
    CrownedOutOfRange { crowned: usize, player_count: usize },

    #[error("{player} has two built districts named {name:?}")]
    DuplicateBuilt { player: String, name: String },

    #[error("role {role} is held by more than one player")]
    DuplicateRole { role: Role },

    #[error("saved table has {saved} players but this game seats {seated}")]
    SeatMismatch { saved: usize, seated: usize },
}

/// Umbrella error for running a game.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Ability(#[from] AbilityError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("the game is already over")]
    GameOver,
}
