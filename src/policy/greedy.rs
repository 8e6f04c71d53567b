//! The computer opponent.
//!
//! A deliberately simple greedy player:
//! - Draft: first role offered; last pick at seven players is a coin flip
//! - Income: cards when holding fewer than two and the catalog is not empty
//! - Keep: the more expensive of the two drawn cards
//! - Build: the most expensive affordable district not already built
//! - Assassin and Warlord pick at random; the Thief robs the first candidate

use crate::cards::{BuildingCard, Role};
use crate::core::{GameRng, GameState, PlayerId};
use crate::effects::DemolitionTarget;

use super::decision::{DecisionPolicy, IncomeChoice};

/// Greedy computer seat with its own random stream.
#[derive(Clone, Debug)]
pub struct GreedyAi {
    rng: GameRng,
}

impl GreedyAi {
    /// Create a computer seat. `rng` should be a stream dedicated to it.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Create a seat whose stream is derived from the table seed.
    #[must_use]
    pub fn for_seat(table: &GameRng, seat: PlayerId) -> Self {
        Self::new(table.for_context(&format!("seat-{}", seat.index())))
    }
}

impl DecisionPolicy for GreedyAi {
    fn choose_role(&mut self, _state: &GameState, _me: PlayerId, _pool: &[Role]) -> usize {
        0
    }

    fn choose_final_role(&mut self, _state: &GameState, _me: PlayerId, _offer: &[Role; 2]) -> usize {
        usize::from(self.rng.coin_flip())
    }

    fn choose_income(&mut self, state: &GameState, me: PlayerId) -> IncomeChoice {
        if state.player(me).hand().len() < 2 && !state.catalog.is_empty() {
            IncomeChoice::Cards
        } else {
            IncomeChoice::Gold
        }
    }

    fn choose_card_to_keep(&mut self, _state: &GameState, _me: PlayerId, drawn: &[BuildingCard; 2]) -> usize {
        if drawn[0].cost >= drawn[1].cost {
            0
        } else {
            1
        }
    }

    fn choose_build(&mut self, state: &GameState, me: PlayerId, _builds_left: usize) -> Option<usize> {
        let player = state.player(me);
        let mut best: Option<(usize, u32)> = None;
        for (index, card) in player.hand().iter().enumerate() {
            if player.can_build(index).is_err() {
                continue;
            }
            if best.map_or(true, |(_, cost)| card.cost > cost) {
                best = Some((index, card.cost));
            }
        }
        best.map(|(index, _)| index)
    }

    fn choose_assassination(&mut self, _state: &GameState, _me: PlayerId, candidates: &[Role]) -> usize {
        self.rng.gen_index(candidates.len())
    }

    fn choose_theft(&mut self, _state: &GameState, _me: PlayerId, _victims: &[PlayerId]) -> usize {
        0
    }

    fn choose_demolition(
        &mut self,
        _state: &GameState,
        _me: PlayerId,
        targets: &[DemolitionTarget],
    ) -> Option<usize> {
        if targets.is_empty() {
            None
        } else {
            Some(self.rng.gen_index(targets.len()))
        }
    }
}
