//! Decision policies: who answers the engine's questions for each seat.
//!
//! - `DecisionPolicy`: the trait every seat implements
//! - `GreedyAi`: the computer opponent
//! - `ScriptedPolicy`: queued answers, for deterministic tables
//!
//! The interactive console seat lives in `cli`.

mod decision;
mod greedy;
mod scripted;

pub use decision::{DecisionPolicy, IncomeChoice, TurnCommand, MAX_ASKS};
pub(crate) use decision::{ask_index, ask_optional};
pub use greedy::GreedyAi;
pub use scripted::ScriptedPolicy;

use crate::core::{GameConfig, GameRng, PlayerId};

/// One `GreedyAi` per seat, each on its own stream derived from the seed.
#[must_use]
pub fn computer_seats(config: &GameConfig) -> Vec<Box<dyn DecisionPolicy>> {
    let table = GameRng::new(config.seed);
    PlayerId::all(config.player_count)
        .map(|seat| Box::new(GreedyAi::for_seat(&table, seat)) as Box<dyn DecisionPolicy>)
        .collect()
}
