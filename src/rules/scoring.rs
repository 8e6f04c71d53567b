//! End-of-game scoring.
//!
//! Per player:
//! - Base: the sum of built costs
//! - +3 for all five colors
//! - +4 for the first to complete a city this round, +2 for every other
//!   city at or above the threshold
//! - Special districts, evaluated against the final table
//!
//! Highest total wins. Ties go to the higher role rank held in the final
//! round; a player without a role never wins a tie. Anything still tied goes
//! to the earlier seat.

use std::cmp::Reverse;

use serde::Serialize;

use crate::cards::{Color, Role};
use crate::core::{GameState, Player, PlayerId, PlayerMap};

/// Bonus for holding all five colors.
pub const ALL_COLORS_BONUS: u32 = 3;

/// Bonus for the first completed city.
pub const FIRST_COMPLETION_BONUS: u32 = 4;

/// Bonus for any other completed city.
pub const COMPLETION_BONUS: u32 = 2;

/// One player's final score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub player: PlayerId,
    pub base: u32,
    pub color_bonus: u32,
    pub completion_bonus: u32,
    pub special_bonus: u32,
    pub total: u32,
}

/// Score one player. `completions` lists who reached the threshold this
/// round, in turn order.
#[must_use]
pub fn score_player(state: &GameState, id: PlayerId, completions: &[PlayerId]) -> ScoreBreakdown {
    let player = state.player(id);
    let city = player.city();

    let base = city.total_cost();
    let color_bonus = if Color::ALL.iter().all(|color| city.count_color(*color) > 0) {
        ALL_COLORS_BONUS
    } else {
        0
    };
    let completion_bonus = if completions.first() == Some(&id) {
        FIRST_COMPLETION_BONUS
    } else if state.has_complete_city(id) {
        COMPLETION_BONUS
    } else {
        0
    };
    let special_bonus = special_bonus(player);

    ScoreBreakdown {
        player: id,
        base,
        color_bonus,
        completion_bonus,
        special_bonus,
        total: base + color_bonus + completion_bonus + special_bonus,
    }
}

/// Points from purple districts.
///
/// The Museum scores a flat 2: cards stored under it are not tracked.
#[must_use]
pub fn special_bonus(player: &Player) -> u32 {
    let purple = player.city().count_color(Color::Purple) as u32;
    player
        .city()
        .iter()
        .filter(|card| card.is_special())
        .map(|card| match card.name.as_str() {
            "University" | "Dragon Gate" | "Museum" => 2,
            "Imperial Treasury" => player.gold(),
            "Map Room" => player.hand().len() as u32,
            "Wishing Well" => purple.saturating_sub(1),
            "Poor House" => u32::from(player.gold() == 0),
            "Park" if player.hand().is_empty() => 2,
            _ => 0,
        })
        .sum()
}

/// Every player's score, in seating order.
#[must_use]
pub fn final_scores(state: &GameState, completions: &[PlayerId]) -> Vec<ScoreBreakdown> {
    state
        .players
        .player_ids()
        .map(|id| score_player(state, id, completions))
        .collect()
}

/// The winner: highest total, then highest role rank, then earliest seat.
#[must_use]
pub fn winner(scores: &[ScoreBreakdown], roles: &PlayerMap<Option<Role>>) -> Option<PlayerId> {
    scores
        .iter()
        .max_by_key(|score| {
            let rank = roles.get(score.player).copied().flatten().map_or(0, Role::rank);
            (score.total, rank, Reverse(score.player))
        })
        .map(|score| score.player)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{BuildingCard, CardId};
    use crate::core::GameRng;
    use crate::zones::Catalog;

    fn table() -> GameState {
        let players = (1..=4).map(|i| Player::new(format!("Player {i}"), 0)).collect();
        GameState::new(players, Catalog::new(), PlayerId::new(0), 8, GameRng::new(0))
    }

    fn build(state: &mut GameState, id: PlayerId, name: &str, color: Color, cost: u32) {
        let card_id = CardId::new(state.building_count() as u32 + 1000);
        state
            .player_mut(id)
            .city_mut()
            .insert(BuildingCard::new(card_id, name, color, cost, ""))
            .unwrap();
    }

    fn score(player: PlayerId, total: u32) -> ScoreBreakdown {
        ScoreBreakdown {
            player,
            base: total,
            color_bonus: 0,
            completion_bonus: 0,
            special_bonus: 0,
            total,
        }
    }

    #[test]
    fn test_base_is_sum_of_costs() {
        let mut state = table();
        let me = PlayerId::new(1);
        build(&mut state, me, "Temple", Color::Blue, 1);
        build(&mut state, me, "Castle", Color::Yellow, 4);

        let breakdown = score_player(&state, me, &[]);
        assert_eq!(breakdown.base, 5);
        assert_eq!(breakdown.total, 5);
    }

    #[test]
    fn test_second_completion_bonus() {
        let mut state = table();
        state.win_threshold = 2;
        let (a, b) = (PlayerId::new(0), PlayerId::new(1));
        for id in [a, b] {
            build(&mut state, id, "Temple", Color::Blue, 1);
            build(&mut state, id, "Tavern", Color::Green, 1);
        }

        assert_eq!(score_player(&state, b, &[b, a]).completion_bonus, FIRST_COMPLETION_BONUS);
        assert_eq!(score_player(&state, a, &[b, a]).completion_bonus, COMPLETION_BONUS);
        assert_eq!(score_player(&state, PlayerId::new(2), &[b, a]).completion_bonus, 0);
    }

    #[test]
    fn test_special_bonuses() {
        let mut state = table();
        let me = PlayerId::new(0);
        build(&mut state, me, "University", Color::Purple, 6);
        build(&mut state, me, "Wishing Well", Color::Purple, 5);
        build(&mut state, me, "Poor House", Color::Purple, 4);
        build(&mut state, me, "Park", Color::Purple, 6);
        // No gold, empty hand: University 2 + Well 3 + Poor House 1 + Park 2.
        assert_eq!(special_bonus(state.player(me)), 8);

        state.player_mut(me).add_gold(3);
        state
            .player_mut(me)
            .add_to_hand(BuildingCard::new(CardId::new(1), "Manor", Color::Yellow, 3, ""));
        assert_eq!(special_bonus(state.player(me)), 5);
    }

    #[test]
    fn test_treasury_and_map_room() {
        let mut state = table();
        let me = PlayerId::new(0);
        build(&mut state, me, "Imperial Treasury", Color::Purple, 5);
        build(&mut state, me, "Map Room", Color::Purple, 5);
        state.player_mut(me).add_gold(4);
        for id in 0..3 {
            state
                .player_mut(me)
                .add_to_hand(BuildingCard::new(CardId::new(id), "Manor", Color::Yellow, 3, ""));
        }
        assert_eq!(special_bonus(state.player(me)), 7);
    }

    #[test]
    fn test_winner_by_total() {
        let roles = PlayerMap::with_value(3, Some(Role::King));
        let scores = vec![score(PlayerId::new(0), 10), score(PlayerId::new(1), 14), score(PlayerId::new(2), 9)];
        assert_eq!(winner(&scores, &roles), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_tie_goes_to_higher_rank() {
        let mut roles = PlayerMap::with_value(3, None);
        roles[PlayerId::new(0)] = Some(Role::Warlord);
        roles[PlayerId::new(1)] = Some(Role::Thief);
        let scores = vec![score(PlayerId::new(0), 12), score(PlayerId::new(1), 12), score(PlayerId::new(2), 12)];
        assert_eq!(winner(&scores, &roles), Some(PlayerId::new(0)));
    }

    #[test]
    fn test_tie_never_prefers_roleless() {
        let mut roles = PlayerMap::with_value(2, None);
        roles[PlayerId::new(1)] = Some(Role::Assassin);
        let scores = vec![score(PlayerId::new(0), 12), score(PlayerId::new(1), 12)];
        assert_eq!(winner(&scores, &roles), Some(PlayerId::new(1)));
    }

    #[test]
    fn test_remaining_tie_goes_to_earlier_seat() {
        let roles = PlayerMap::with_value(2, None);
        let scores = vec![score(PlayerId::new(0), 12), score(PlayerId::new(1), 12)];
        assert_eq!(winner(&scores, &roles), Some(PlayerId::new(0)));
    }
}
