//! Core types: seats, player records, table state, RNG, configuration, errors.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{GameConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use error::{AbilityError, BuildError, CatalogError, ConfigError, GameError, SnapshotError, SpendError};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, Player};
