//! The role registry - the eight characters drafted each round.
//!
//! Roles are a closed set, so the registry is an enum rather than a lookup
//! table: a role that does not exist cannot be named. Rank is the turn order
//! and is stable across rounds.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::building::Color;

/// One of the eight roles, in rank order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Assassin,
    Thief,
    Magician,
    King,
    Bishop,
    Merchant,
    Architect,
    Warlord,
}

impl Role {
    /// The registry, in rank order.
    pub const ALL: [Role; 8] = [
        Role::Assassin,
        Role::Thief,
        Role::Magician,
        Role::King,
        Role::Bishop,
        Role::Merchant,
        Role::Architect,
        Role::Warlord,
    ];

    /// Turn-order rank, 1 through 8.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Role::Assassin => 1,
            Role::Thief => 2,
            Role::Magician => 3,
            Role::King => 4,
            Role::Bishop => 5,
            Role::Merchant => 6,
            Role::Architect => 7,
            Role::Warlord => 8,
        }
    }

    /// Look up a role by rank.
    #[must_use]
    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|role| role.rank() == rank)
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Role::Assassin => "Assassin",
            Role::Thief => "Thief",
            Role::Magician => "Magician",
            Role::King => "King",
            Role::Bishop => "Bishop",
            Role::Merchant => "Merchant",
            Role::Architect => "Architect",
            Role::Warlord => "Warlord",
        }
    }

    /// Short ability description shown during the draft.
    #[must_use]
    pub const fn ability(self) -> &'static str {
        match self {
            Role::Assassin => "Kill a character: its holder loses their turn this round",
            Role::Thief => "Steal all gold from another character",
            Role::Magician => "Swap your whole hand for fresh cards from the deck",
            Role::King => "Gain gold for yellow districts, take the crown next round",
            Role::Bishop => "Gain gold for blue districts, buildings immune to the Warlord",
            Role::Merchant => "Gain gold for green districts, +1 gold",
            Role::Architect => "Draw 2 extra cards, build up to 3 districts",
            Role::Warlord => "Gain gold for red districts, destroy a building",
        }
    }

    /// The district color this role collects income for, if any.
    #[must_use]
    pub const fn income_color(self) -> Option<Color> {
        match self {
            Role::King => Some(Color::Yellow),
            Role::Bishop => Some(Color::Blue),
            Role::Merchant => Some(Color::Green),
            Role::Warlord => Some(Color::Red),
            _ => None,
        }
    }

    /// Flat gold granted on top of color income.
    #[must_use]
    pub const fn flat_bonus(self) -> u32 {
        match self {
            Role::Merchant => 1,
            _ => 0,
        }
    }

    /// Districts this role may build in one turn.
    #[must_use]
    pub const fn build_cap(self) -> usize {
        match self {
            Role::Architect => 3,
            _ => 1,
        }
    }

    /// Whether the ability resolves before the income choice.
    #[must_use]
    pub const fn acts_before_income(self) -> bool {
        matches!(self, Role::Assassin | Role::Thief)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a name matches no role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranks_are_a_total_order() {
        let ranks: Vec<u8> = Role::ALL.iter().map(|r| r.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6, 7, 8]);

        // Derived Ord agrees with rank.
        let mut shuffled = vec![Role::Warlord, Role::Assassin, Role::King];
        shuffled.sort();
        assert_eq!(shuffled, vec![Role::Assassin, Role::King, Role::Warlord]);
    }

    #[test]
    fn test_from_rank() {
        assert_eq!(Role::from_rank(4), Some(Role::King));
        assert_eq!(Role::from_rank(0), None);
        assert_eq!(Role::from_rank(9), None);
    }

    #[test]
    fn test_parse_name() {
        assert_eq!("warlord".parse::<Role>(), Ok(Role::Warlord));
        assert_eq!("King".parse::<Role>(), Ok(Role::King));
        assert!("Queen".parse::<Role>().is_err());
    }

    #[test]
    fn test_income_roles() {
        assert_eq!(Role::King.income_color(), Some(Color::Yellow));
        assert_eq!(Role::Bishop.income_color(), Some(Color::Blue));
        assert_eq!(Role::Merchant.income_color(), Some(Color::Green));
        assert_eq!(Role::Warlord.income_color(), Some(Color::Red));
        assert_eq!(Role::Thief.income_color(), None);
        assert_eq!(Role::Merchant.flat_bonus(), 1);
    }

    #[test]
    fn test_build_caps() {
        assert_eq!(Role::Architect.build_cap(), 3);
        for role in Role::ALL.iter().filter(|r| **r != Role::Architect) {
            assert_eq!(role.build_cap(), 1);
        }
    }

    #[test]
    fn test_serializes_by_name() {
        let json = serde_json::to_string(&Some(Role::Bishop)).unwrap();
        assert_eq!(json, "\"Bishop\"");
    }
}
