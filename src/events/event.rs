//! Game event types.
//!
//! Events are the engine's only output channel: every observable state change
//! is announced as a `GameEvent`, in order. The engine never formats text;
//! a presentation layer subscribes and renders.

use crate::cards::{BuildingCard, Role};
use crate::core::{BuildError, PlayerId};
use crate::effects::AbilityOutcome;
use crate::rules::ScoreBreakdown;

/// Why the game stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// Someone completed a city.
    CityCompleted,
    /// The configured round limit was hit first.
    RoundLimit,
}

/// One observable happening.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A round begins; `crowned` opens the draft.
    RoundStarted { round: u32, crowned: PlayerId },

    /// The role pool is set. `face_up` are announced discards; `hidden_offered`
    /// is true when the withheld role goes to the last picker (7 players).
    DraftPrepared {
        face_up: Vec<Role>,
        hidden_offered: bool,
        reshuffles: u32,
    },

    /// A seat took a role. Presentation decides who may see which role.
    RoleAssigned { player: PlayerId, role: Role },

    /// A rank was reached and its holder begins.
    TurnStarted { player: PlayerId, role: Role },

    /// The holder was assassinated; the whole turn is skipped.
    TurnSkipped { player: PlayerId, role: Role },

    /// Fixed income. `fallback` marks the automatic grant when the catalog
    /// was empty.
    GoldTaken {
        player: PlayerId,
        amount: u32,
        fallback: bool,
    },

    /// Card income: `kept` went to hand, `returned` went under the catalog.
    CardKept {
        player: PlayerId,
        kept: BuildingCard,
        returned: Option<BuildingCard>,
    },

    /// A district was built.
    DistrictBuilt { player: PlayerId, card: BuildingCard },

    /// A build attempt was refused; nothing changed.
    BuildRefused { player: PlayerId, reason: BuildError },

    /// A role ability fired.
    AbilityResolved {
        player: PlayerId,
        role: Role,
        outcome: AbilityOutcome,
    },

    /// A second ability use in the same round was refused.
    AbilityRejected { player: PlayerId, role: Role },

    /// A city reached the win threshold; `first` marks the first this round.
    CityCompleted { player: PlayerId, first: bool },

    /// The crown moves for the next round.
    CrownPassed { player: PlayerId },

    /// All ranks have been walked.
    RoundEnded { round: u32 },

    /// The table was written to disk.
    GameSaved { path: String },

    /// A save or load failed; the game continues unchanged.
    PersistenceFailed { path: String, reason: String },

    /// A saved table will replace this one at the start of the next round.
    RestoreQueued { path: String },

    /// A saved table replaced the current one.
    GameRestored,

    /// Diagnostics toggled.
    DebugToggled { enabled: bool },

    /// Final scores, in seating order.
    GameEnded {
        scores: Vec<ScoreBreakdown>,
        winner: Option<PlayerId>,
        reason: EndReason,
    },
}

impl GameEvent {
    /// The seat this event is about, if it concerns one seat.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::RoleAssigned { player, .. }
            | GameEvent::TurnStarted { player, .. }
            | GameEvent::TurnSkipped { player, .. }
            | GameEvent::GoldTaken { player, .. }
            | GameEvent::CardKept { player, .. }
            | GameEvent::DistrictBuilt { player, .. }
            | GameEvent::BuildRefused { player, .. }
            | GameEvent::AbilityResolved { player, .. }
            | GameEvent::AbilityRejected { player, .. }
            | GameEvent::CityCompleted { player, .. }
            | GameEvent::CrownPassed { player } => Some(*player),
            _ => None,
        }
    }
}
