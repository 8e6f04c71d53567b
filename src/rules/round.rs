//! Per-round bookkeeping and the context threaded through every phase.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::cards::Role;
use crate::core::{GameState, PlayerId, PlayerMap};
use crate::events::{EventBus, GameEvent};
use crate::persist::Snapshot;
use crate::policy::DecisionPolicy;

/// One decision policy per seat.
pub type Seats = PlayerMap<Box<dyn DecisionPolicy>>;

/// State that lives for exactly one round.
#[derive(Clone, Debug, Default)]
pub struct RoundState {
    /// Round number, starting at 1.
    pub number: u32,

    /// Roles discarded face up during the draft.
    pub face_up: SmallVec<[Role; 2]>,

    /// The role named by the Assassin.
    pub killed: Option<Role>,

    /// Players whose cities the Warlord may not touch.
    pub immune: FxHashSet<PlayerId>,

    /// Players whose ability already resolved.
    pub abilities_used: FxHashSet<PlayerId>,

    /// Players who reached the win threshold, in turn order.
    pub completions: Vec<PlayerId>,

    /// A loaded table waiting to replace this one.
    pub restore: Option<Snapshot>,
}

impl RoundState {
    /// Fresh bookkeeping for round `number`.
    #[must_use]
    pub fn new(number: u32) -> Self {
        Self {
            number,
            ..Self::default()
        }
    }

    /// Whether anyone finished a city this round.
    #[must_use]
    pub fn is_final(&self) -> bool {
        !self.completions.is_empty()
    }
}

/// Everything a phase function may touch.
///
/// Fields are public so a phase can borrow the table and a seat's policy at
/// the same time.
pub struct RoundContext<'a> {
    pub state: &'a mut GameState,
    pub seats: &'a mut Seats,
    pub events: &'a mut EventBus,
    pub round: &'a mut RoundState,
}

impl<'a> RoundContext<'a> {
    /// Bundle the pieces of one round.
    pub fn new(
        state: &'a mut GameState,
        seats: &'a mut Seats,
        events: &'a mut EventBus,
        round: &'a mut RoundState,
    ) -> Self {
        Self {
            state,
            seats,
            events,
            round,
        }
    }

    /// Publish an event against the current table.
    pub fn emit(&mut self, event: GameEvent) {
        self.events.publish(event, self.state);
    }

    /// Record a city completion the first time a player reaches the
    /// threshold this round.
    pub fn note_completion(&mut self, player: PlayerId) {
        if self.state.has_complete_city(player) && !self.round.completions.contains(&player) {
            self.round.completions.push(player);
            let first = self.round.completions.len() == 1;
            tracing::info!(%player, first, "city completed");
            self.emit(GameEvent::CityCompleted { player, first });
        }
    }
}
