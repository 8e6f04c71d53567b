//! Building cards - the districts players draw, hold and build.
//!
//! A `BuildingCard` is an immutable value. Several physical copies may share
//! a name (the catalog holds three Manors), so each copy also carries a
//! `CardId` assigned by the catalog that supplied it.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of one physical card copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// District color category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
}

impl Color {
    /// Every color, used for the all-colors scoring bonus.
    pub const ALL: [Color; 5] = [Color::Red, Color::Blue, Color::Green, Color::Yellow, Color::Purple];

    /// Lowercase name as it appears in card lists.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Purple => "purple",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a color name is not one of the five categories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownColor(pub String);

impl FromStr for Color {
    type Err = UnknownColor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "blue" => Ok(Color::Blue),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "purple" => Ok(Color::Purple),
            _ => Err(UnknownColor(s.to_string())),
        }
    }
}

/// One physical building card.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildingCard {
    /// Physical copy identifier.
    pub id: CardId,

    /// District name. Not unique across copies.
    pub name: String,

    /// Color category.
    pub color: Color,

    /// Gold needed to build; also the card's base score.
    pub cost: u32,

    /// Ability text, only meaningful for purple districts.
    #[serde(default)]
    pub text: String,
}

impl BuildingCard {
    /// Create a new card.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, color: Color, cost: u32, text: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            cost,
            text: text.into(),
        }
    }

    /// Whether this is a purple (special) district.
    #[must_use]
    pub fn is_special(&self) -> bool {
        self.color == Color::Purple
    }

    /// Gold the Warlord pays to destroy this district.
    #[must_use]
    pub fn demolition_price(&self) -> u32 {
        self.cost.saturating_sub(1)
    }
}

impl std::fmt::Display for BuildingCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}] [{}]", self.name, self.color, self.cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_is_case_insensitive() {
        assert_eq!("Yellow".parse::<Color>(), Ok(Color::Yellow));
        assert_eq!(" purple ".parse::<Color>(), Ok(Color::Purple));
        assert_eq!("teal".parse::<Color>(), Err(UnknownColor("teal".to_string())));
    }

    #[test]
    fn test_color_display_round_trip() {
        for color in Color::ALL {
            assert_eq!(color.to_string().parse::<Color>(), Ok(color));
        }
    }

    #[test]
    fn test_demolition_price() {
        let watchtower = BuildingCard::new(CardId::new(1), "Watchtower", Color::Red, 1, "");
        let castle = BuildingCard::new(CardId::new(2), "Castle", Color::Yellow, 4, "");
        assert_eq!(watchtower.demolition_price(), 0);
        assert_eq!(castle.demolition_price(), 3);
    }

    #[test]
    fn test_display() {
        let card = BuildingCard::new(CardId::new(7), "Market", Color::Green, 2, "");
        assert_eq!(card.to_string(), "Market [green] [2]");
        assert!(!card.is_special());
    }

    #[test]
    fn test_serialization() {
        let card = BuildingCard::new(CardId::new(3), "Park", Color::Purple, 6, "Draw when empty");
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"purple\""));
        let deserialized: BuildingCard = serde_json::from_str(&json).unwrap();
        assert_eq!(card, deserialized);
    }
}
