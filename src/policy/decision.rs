//! The decision interface.
//!
//! Every choice the engine needs from a seat goes through `DecisionPolicy`.
//! Policies only see the table read-only and answer with an index (or a small
//! enum); the engine validates the answer and re-asks when it is out of range,
//! so a policy can never mutate state directly.

use std::path::PathBuf;

use crate::cards::{BuildingCard, Role};
use crate::core::{GameState, PlayerId};
use crate::effects::DemolitionTarget;

/// Answers accepted before the engine gives up re-asking and takes the
/// first option.
pub const MAX_ASKS: usize = 32;

/// Income mode for a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IncomeChoice {
    /// Take two gold.
    Gold,
    /// Draw two cards, keep one.
    Cards,
}

/// What a seat wants to do in the command window after its ability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnCommand {
    /// Finish the turn.
    EndTurn,
    /// Ask for the role ability again. Always refused: it already resolved.
    UseAbility,
    /// Write the table to a file and keep playing.
    Save(PathBuf),
    /// Load a table from a file; it replaces this one once the turn ends.
    Load(PathBuf),
    /// Flip diagnostics on or off.
    ToggleDebug,
}

/// A seat's decision maker.
///
/// Index answers are positions into the slice offered. Defaults exist only
/// where a non-interactive seat has an obvious answer.
pub trait DecisionPolicy {
    /// Whether a person sits behind this policy.
    fn is_human(&self) -> bool {
        false
    }

    /// Pick one role from the draft pool.
    fn choose_role(&mut self, state: &GameState, me: PlayerId, pool: &[Role]) -> usize;

    /// Last pick at a seven-player table: the remaining visible role or the
    /// withheld one.
    fn choose_final_role(&mut self, state: &GameState, me: PlayerId, offer: &[Role; 2]) -> usize;

    /// Gold or cards.
    fn choose_income(&mut self, state: &GameState, me: PlayerId) -> IncomeChoice;

    /// Keep one of the two cards drawn for income.
    fn choose_card_to_keep(&mut self, state: &GameState, me: PlayerId, drawn: &[BuildingCard; 2]) -> usize;

    /// Hand position to build, or `None` to stop building. `builds_left` is
    /// how many more builds the role allows this turn.
    fn choose_build(&mut self, state: &GameState, me: PlayerId, builds_left: usize) -> Option<usize>;

    /// Assassin: the role to kill.
    fn choose_assassination(&mut self, state: &GameState, me: PlayerId, candidates: &[Role]) -> usize;

    /// Thief: the player to rob.
    fn choose_theft(&mut self, state: &GameState, me: PlayerId, victims: &[PlayerId]) -> usize;

    /// Warlord: the building to destroy, or `None` to spare everyone.
    fn choose_demolition(
        &mut self,
        state: &GameState,
        me: PlayerId,
        targets: &[DemolitionTarget],
    ) -> Option<usize>;

    /// Command window. Called until it returns `EndTurn`.
    fn next_command(&mut self, _state: &GameState, _me: PlayerId) -> TurnCommand {
        TurnCommand::EndTurn
    }
}

/// Ask until the answer falls in `0..limit`.
///
/// After `MAX_ASKS` bad answers the first option is taken, so a broken
/// policy cannot stall the table.
pub(crate) fn ask_index(limit: usize, what: &str, mut ask: impl FnMut() -> usize) -> usize {
    debug_assert!(limit > 0, "nothing to choose from");
    for _ in 0..MAX_ASKS {
        let answer = ask();
        if answer < limit {
            return answer;
        }
        tracing::warn!(answer, limit, what, "choice out of range, asking again");
    }
    tracing::warn!(what, "too many invalid answers, taking the first option");
    0
}

/// Like `ask_index`, but `None` (decline) is always a valid answer.
pub(crate) fn ask_optional(limit: usize, what: &str, mut ask: impl FnMut() -> Option<usize>) -> Option<usize> {
    for _ in 0..MAX_ASKS {
        match ask() {
            None => return None,
            Some(answer) if answer < limit => return Some(answer),
            Some(answer) => {
                tracing::warn!(answer, limit, what, "choice out of range, asking again");
            }
        }
    }
    tracing::warn!(what, "too many invalid answers, declining");
    None
}
