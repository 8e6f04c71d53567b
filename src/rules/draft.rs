//! The character draft.
//!
//! Each round the eight roles are shuffled, one is withheld face down and,
//! at four or five players, one or two more are discarded face up. The King
//! is never discarded face up: if it lands there the whole shuffle starts
//! over. Picking starts at the crowned seat and wraps around the table. At
//! seven players the last picker chooses between the one role left in the
//! pool and the face-down one.

use smallvec::SmallVec;

use crate::cards::Role;
use crate::core::{ConfigError, GameRng, PlayerId, MAX_PLAYERS, MIN_PLAYERS};
use crate::events::GameEvent;
use crate::policy::ask_index;

use super::round::RoundContext;

/// Roles discarded face up for a table size.
pub fn face_up_count(player_count: usize) -> Result<usize, ConfigError> {
    match player_count {
        4 => Ok(2),
        5 => Ok(1),
        6 | 7 => Ok(0),
        n => Err(ConfigError::PlayerCount(n)),
    }
}

/// The role pool for one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Draft {
    player_count: usize,
    pool: Vec<Role>,
    hidden: Option<Role>,
    face_up: SmallVec<[Role; 2]>,
    reshuffles: u32,
}

impl Draft {
    /// Shuffle and withhold roles for a table of `player_count`.
    pub fn prepare(player_count: usize, rng: &mut GameRng) -> Result<Self, ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(ConfigError::PlayerCount(player_count));
        }
        let discards = face_up_count(player_count)?;
        let mut reshuffles = 0;

        loop {
            let mut roles = Role::ALL.to_vec();
            rng.shuffle(&mut roles);

            let hidden = roles.pop();
            let face_up: SmallVec<[Role; 2]> = roles.drain(roles.len() - discards..).collect();
            if face_up.contains(&Role::King) {
                reshuffles += 1;
                tracing::debug!(reshuffles, "king drawn face up, reshuffling");
                continue;
            }

            return Ok(Self {
                player_count,
                pool: roles,
                hidden,
                face_up,
                reshuffles,
            });
        }
    }

    /// Roles still pickable.
    #[must_use]
    pub fn pool(&self) -> &[Role] {
        &self.pool
    }

    /// The face-down role, until it is offered.
    #[must_use]
    pub fn hidden(&self) -> Option<Role> {
        self.hidden
    }

    /// Roles discarded face up.
    #[must_use]
    pub fn face_up(&self) -> &[Role] {
        &self.face_up
    }

    /// How many times the King forced a fresh shuffle.
    #[must_use]
    pub fn reshuffles(&self) -> u32 {
        self.reshuffles
    }

    /// Whether the face-down role goes to the last picker.
    #[must_use]
    pub fn offers_hidden(&self) -> bool {
        self.player_count == MAX_PLAYERS
    }

    /// Remove a role from the pool.
    pub fn take(&mut self, index: usize) -> Option<Role> {
        (index < self.pool.len()).then(|| self.pool.remove(index))
    }

    /// The two roles offered to the last picker at seven players: the last
    /// visible role and the face-down one. Empties both.
    pub fn take_final_offer(&mut self) -> Option<[Role; 2]> {
        if !self.offers_hidden() || self.pool.len() != 1 {
            return None;
        }
        let hidden = self.hidden.take()?;
        let visible = self.pool.pop()?;
        Some([visible, hidden])
    }
}

/// Run the draft for a round: prepare the pool, then let every seat pick,
/// starting with the crowned player.
///
/// Returns the exhausted draft so callers can see what was left over.
pub fn run(cx: &mut RoundContext<'_>) -> Result<Draft, ConfigError> {
    let player_count = cx.state.player_count();
    let mut draft = Draft::prepare(player_count, &mut cx.state.rng)?;
    cx.round.face_up = draft.face_up.clone();
    cx.emit(GameEvent::DraftPrepared {
        face_up: draft.face_up().to_vec(),
        hidden_offered: draft.offers_hidden(),
        reshuffles: draft.reshuffles(),
    });

    let order: Vec<PlayerId> = PlayerId::seating_from(cx.state.crowned, player_count).collect();
    for (position, seat) in order.into_iter().enumerate() {
        let is_last = position + 1 == player_count;
        let final_offer = if is_last { draft.take_final_offer() } else { None };
        let role = match final_offer {
            Some(offer) => {
                let pick = ask_index(offer.len(), "final role", || {
                    cx.seats[seat].choose_final_role(cx.state, seat, &offer)
                });
                offer[pick]
            }
            None => pick_from_pool(cx, &mut draft, seat),
        };

        cx.state.player_mut(seat).assign_role(role);
        tracing::debug!(%seat, %role, "role assigned");
        cx.emit(GameEvent::RoleAssigned { player: seat, role });
    }

    debug_assert!(
        {
            let mut held: Vec<Role> = cx.state.players.values().filter_map(|p| p.role()).collect();
            held.sort();
            held.dedup();
            held.len() == player_count
        },
        "every seat holds a distinct role"
    );
    Ok(draft)
}

fn pick_from_pool(cx: &mut RoundContext<'_>, draft: &mut Draft, seat: PlayerId) -> Role {
    let pool = draft.pool().to_vec();
    let pick = ask_index(pool.len(), "role", || cx.seats[seat].choose_role(cx.state, seat, &pool));
    // `ask_index` keeps the pick in range.
    draft.take(pick).unwrap_or(pool[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_up_counts() {
        assert_eq!(face_up_count(4), Ok(2));
        assert_eq!(face_up_count(5), Ok(1));
        assert_eq!(face_up_count(6), Ok(0));
        assert_eq!(face_up_count(7), Ok(0));
        assert_eq!(face_up_count(3), Err(ConfigError::PlayerCount(3)));
    }

    #[test]
    fn test_prepare_rejects_bad_count() {
        let mut rng = GameRng::new(1);
        assert_eq!(Draft::prepare(8, &mut rng), Err(ConfigError::PlayerCount(8)));
        assert_eq!(Draft::prepare(2, &mut rng), Err(ConfigError::PlayerCount(2)));
    }

    #[test]
    fn test_pool_sizes() {
        let mut rng = GameRng::new(7);
        for (players, pool) in [(4, 5), (5, 6), (6, 7), (7, 7)] {
            let draft = Draft::prepare(players, &mut rng).unwrap();
            assert_eq!(draft.pool().len(), pool, "{players} players");
            assert!(draft.hidden().is_some());
            assert_eq!(draft.face_up().len(), face_up_count(players).unwrap());
        }
    }

    #[test]
    fn test_king_never_face_up() {
        let mut rng = GameRng::new(11);
        for _ in 0..500 {
            let draft = Draft::prepare(4, &mut rng).unwrap();
            assert!(!draft.face_up().contains(&Role::King));
        }
    }

    #[test]
    fn test_final_offer_only_at_seven() {
        let mut rng = GameRng::new(2);
        let mut draft = Draft::prepare(6, &mut rng).unwrap();
        while draft.pool().len() > 1 {
            draft.take(0);
        }
        assert_eq!(draft.take_final_offer(), None);

        let mut draft = Draft::prepare(7, &mut rng).unwrap();
        let hidden = draft.hidden().unwrap();
        while draft.pool().len() > 1 {
            draft.take(0);
        }
        let last = draft.pool()[0];
        assert_eq!(draft.take_final_offer(), Some([last, hidden]));
        assert!(draft.pool().is_empty());
        assert_eq!(draft.hidden(), None);
    }

    #[test]
    fn test_take_out_of_range() {
        let mut rng = GameRng::new(2);
        let mut draft = Draft::prepare(5, &mut rng).unwrap();
        assert_eq!(draft.take(40), None);
        assert_eq!(draft.pool().len(), 6);
    }
}
