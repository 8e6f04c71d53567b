//! Role abilities as data.
//!
//! Each role's ability is planned into an `AbilityAction` (the role plus the
//! choices it needs, already validated) and then applied, producing an
//! `AbilityOutcome` for the event stream. Keeping the two apart means choices
//! are collected before anything on the table changes.

use crate::cards::{BuildingCard, CardId, Role};
use crate::core::PlayerId;

/// A building the Warlord could destroy right now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemolitionTarget {
    /// Owner of the building.
    pub owner: PlayerId,
    /// Physical copy in the owner's city.
    pub card: CardId,
    /// District name, for display.
    pub name: String,
    /// Gold the Warlord must pay.
    pub price: u32,
}

/// A planned ability, one variant per role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbilityAction {
    /// Kill a role; its holder loses the turn.
    Assassinate { target: Role },
    /// Take a player's whole balance. `None` when nobody can be robbed.
    Steal { victim: Option<PlayerId> },
    /// Swap the whole hand for fresh cards.
    RefreshHand,
    /// Color income, then take the crown.
    TakeCrown,
    /// Color income, city protected this round.
    Sanctify,
    /// Color income plus the flat bonus.
    Trade,
    /// Draw two extra cards.
    DrawExtra,
    /// Color income, then maybe destroy a building.
    Raze { target: Option<DemolitionTarget> },
}

impl AbilityAction {
    /// The role this action belongs to.
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            AbilityAction::Assassinate { .. } => Role::Assassin,
            AbilityAction::Steal { .. } => Role::Thief,
            AbilityAction::RefreshHand => Role::Magician,
            AbilityAction::TakeCrown => Role::King,
            AbilityAction::Sanctify => Role::Bishop,
            AbilityAction::Trade => Role::Merchant,
            AbilityAction::DrawExtra => Role::Architect,
            AbilityAction::Raze { .. } => Role::Warlord,
        }
    }
}

/// What an ability did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AbilityOutcome {
    /// `target` was named; `victim` is its holder if anyone drafted it.
    Assassinated { target: Role, victim: Option<PlayerId> },
    Robbed { victim: PlayerId, amount: u32 },
    NothingToRob,
    HandRefreshed { returned: usize, drawn: usize },
    Crowned { income: u32 },
    Sanctified { income: u32 },
    Traded { income: u32 },
    ExtraCards { drawn: usize },
    Razed {
        income: u32,
        victim: PlayerId,
        building: BuildingCard,
        paid: u32,
    },
    /// The Warlord had nobody to target.
    NoTargets { income: u32 },
    /// The Warlord chose to spare everyone.
    Declined { income: u32 },
}

impl AbilityOutcome {
    /// Gold the actor gained from color income (and the flat bonus).
    #[must_use]
    pub fn income(&self) -> u32 {
        match self {
            AbilityOutcome::Crowned { income }
            | AbilityOutcome::Sanctified { income }
            | AbilityOutcome::Traded { income }
            | AbilityOutcome::Razed { income, .. }
            | AbilityOutcome::NoTargets { income }
            | AbilityOutcome::Declined { income } => *income,
            _ => 0,
        }
    }
}
