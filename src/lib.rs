//! # rust-citadels
//!
//! A round-based city-building card game for one human and several computer
//! opponents. Each round players draft hidden roles, then act in role order:
//! take income, build districts, fire their role's ability. The game ends at
//! the end of the round in which someone completes a city.
//!
//! ## Design Principles
//!
//! 1. **Injected decisions**: every choice goes through a `DecisionPolicy`.
//!    The engine validates answers and re-asks; policies never touch state.
//!
//! 2. **Events out, no text**: the engine announces what happened as an
//!    ordered `GameEvent` stream. Rendering is a subscriber's job.
//!
//! 3. **Deterministic**: a seed reproduces a game. Each computer seat draws
//!    from its own derived RNG stream.
//!
//! ## Modules
//!
//! - `core`: Seats, player records, table state, RNG, configuration, errors
//! - `cards`: Building cards, the role registry, card-list loading
//! - `zones`: The catalog (draw pile) and cities
//! - `rules`: Draft, turns, scoring and the round loop
//! - `effects`: Role abilities
//! - `policy`: Decision policies (computer, scripted)
//! - `events`: Event stream and subscribers
//! - `persist`: Snapshots in JSON or bincode
//! - `cli`: Console front end

pub mod core;
pub mod cards;
pub mod zones;
pub mod rules;
pub mod effects;
pub mod policy;
pub mod events;
pub mod persist;
pub mod cli;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, GameError, GameRng, GameRngState, GameState, Player, PlayerId, PlayerMap,
    MAX_PLAYERS, MIN_PLAYERS,
};

pub use crate::cards::{BuildingCard, CardId, Color, Role};

pub use crate::zones::{Catalog, City};

pub use crate::rules::{Draft, GameEngine, GameOutcome, RoundContext, RoundState, ScoreBreakdown};

pub use crate::effects::{AbilityAction, AbilityOutcome, DemolitionTarget};

pub use crate::policy::{DecisionPolicy, GreedyAi, IncomeChoice, ScriptedPolicy, TurnCommand};

pub use crate::events::{EndReason, EventBus, EventSink, GameEvent};

pub use crate::persist::{PlayerSnapshot, Snapshot};
