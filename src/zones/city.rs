//! A player's built districts.
//!
//! The city is a name-unique set: two copies of the same district can sit in
//! a hand, but only one can ever be built.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{BuildingCard, CardId, Color};
use crate::core::BuildError;

/// Built districts, in build order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct City {
    districts: Vec<BuildingCard>,
}

impl City {
    /// Create an empty city.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a district, refusing a second district with the same name.
    pub fn insert(&mut self, card: BuildingCard) -> Result<(), BuildError> {
        if self.contains_name(&card.name) {
            return Err(BuildError::DuplicateName(card.name));
        }
        self.districts.push(card);
        Ok(())
    }

    /// Remove a specific physical district.
    pub fn remove(&mut self, id: CardId) -> Option<BuildingCard> {
        let pos = self.districts.iter().position(|c| c.id == id)?;
        Some(self.districts.remove(pos))
    }

    /// Look up a built district by id.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&BuildingCard> {
        self.districts.iter().find(|c| c.id == id)
    }

    /// Whether a district with this name is built.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.districts.iter().any(|c| c.name == name)
    }

    /// Number of built districts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.districts.len()
    }

    /// Whether nothing is built.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    /// Iterate in build order.
    pub fn iter(&self) -> impl Iterator<Item = &BuildingCard> {
        self.districts.iter()
    }

    /// Count districts of one color.
    #[must_use]
    pub fn count_color(&self, color: Color) -> usize {
        self.districts.iter().filter(|c| c.color == color).count()
    }

    /// Distinct colors present.
    #[must_use]
    pub fn colors(&self) -> FxHashSet<Color> {
        self.districts.iter().map(|c| c.color).collect()
    }

    /// Sum of all district costs.
    #[must_use]
    pub fn total_cost(&self) -> u32 {
        self.districts.iter().map(|c| c.cost).sum()
    }
}
