//! The shared building supply.
//!
//! The `Catalog` is an ordered zone: cards are drawn from the top and
//! returned to the bottom. It only shrinks through draws and only grows
//! through deliberate returns (the second card of a draw-two, a refreshed
//! hand, a destroyed building), so the number of physical cards in play is
//! conserved.

use std::collections::VecDeque;

use crate::cards::{BuildingCard, CardId, Color};
use crate::core::GameRng;

/// Ordered deck of building cards. Front is the top.
///
/// ## Usage
///
/// ```
/// use rust_citadels::cards::Color;
/// use rust_citadels::zones::Catalog;
///
/// let mut catalog = Catalog::new();
/// catalog.supply("Temple", Color::Blue, 1, "", 3);
/// assert_eq!(catalog.len(), 3);
///
/// let card = catalog.draw().unwrap();
/// assert_eq!(card.name, "Temple");
/// catalog.return_to_bottom(card);
/// assert_eq!(catalog.len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    cards: VecDeque<BuildingCard>,
    next_id: u32,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a catalog from saved contents, keeping their order and ids.
    #[must_use]
    pub fn from_cards(cards: Vec<BuildingCard>) -> Self {
        let next_id = cards.iter().map(|c| c.id.raw() + 1).max().unwrap_or(0);
        Self {
            cards: cards.into(),
            next_id,
        }
    }

    /// Add `count` physical copies of one card type to the bottom.
    pub fn supply(&mut self, name: &str, color: Color, cost: u32, text: &str, count: usize) {
        for _ in 0..count {
            let id = self.alloc_id();
            self.cards.push_back(BuildingCard::new(id, name, color, cost, text));
        }
    }

    /// Reserve an id that no card from this catalog uses.
    ///
    /// Cards entering play from outside (restored saves) take ids from here
    /// so they never collide with supplied copies.
    pub fn alloc_id(&mut self) -> CardId {
        let id = CardId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Make sure future ids do not collide with `id`.
    pub fn reserve_id(&mut self, id: CardId) {
        self.next_id = self.next_id.max(id.raw() + 1);
    }

    /// Shuffle the whole deck.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(self.cards.make_contiguous());
    }

    /// Take the top card.
    pub fn draw(&mut self) -> Option<BuildingCard> {
        self.cards.pop_front()
    }

    /// Take up to `count` cards from the top, stopping early if the deck
    /// runs out.
    pub fn draw_up_to(&mut self, count: usize) -> Vec<BuildingCard> {
        let take = count.min(self.cards.len());
        self.cards.drain(..take).collect()
    }

    /// Look at the top card without drawing it.
    #[must_use]
    pub fn peek(&self) -> Option<&BuildingCard> {
        self.cards.front()
    }

    /// Put a card under the deck.
    pub fn return_to_bottom(&mut self, card: BuildingCard) {
        self.cards.push_back(card);
    }

    /// Number of cards left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the deck is exhausted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate from top to bottom.
    pub fn iter(&self) -> impl Iterator<Item = &BuildingCard> {
        self.cards.iter()
    }

    /// Find the first card type with this name (case-insensitive), for
    /// card-info lookups.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&BuildingCard> {
        self.cards.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.supply("Manor", Color::Yellow, 3, "", 2);
        catalog.supply("Tavern", Color::Green, 1, "", 3);
        catalog
    }

    #[test]
    fn test_supply_assigns_unique_ids() {
        let catalog = sample();
        let mut ids: Vec<_> = catalog.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_draw_from_top_return_to_bottom() {
        let mut catalog = sample();
        let top = catalog.draw().unwrap();
        assert_eq!(top.name, "Manor");
        assert_eq!(catalog.len(), 4);

        catalog.return_to_bottom(top.clone());
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.iter().last(), Some(&top));
        assert_eq!(catalog.peek().map(|c| c.name.as_str()), Some("Manor"));
    }

    #[test]
    fn test_draw_up_to_stops_when_empty() {
        let mut catalog = sample();
        assert_eq!(catalog.draw_up_to(3).len(), 3);
        assert_eq!(catalog.draw_up_to(3).len(), 2);
        assert!(catalog.is_empty());
        assert!(catalog.draw().is_none());
        assert!(catalog.draw_up_to(2).is_empty());
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let mut a = sample();
        let mut b = sample();
        a.shuffle(&mut GameRng::new(7));
        b.shuffle(&mut GameRng::new(7));

        let order_a: Vec<_> = a.iter().map(|c| c.id).collect();
        let order_b: Vec<_> = b.iter().map(|c| c.id).collect();
        assert_eq!(order_a, order_b);
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn test_from_cards_keeps_ids_fresh() {
        let mut original = sample();
        let cards: Vec<_> = original.draw_up_to(5);
        let mut restored = Catalog::from_cards(cards);
        let fresh = restored.alloc_id();
        assert!(restored.iter().all(|c| c.id != fresh));
    }

    #[test]
    fn test_find_by_name() {
        let catalog = sample();
        assert_eq!(catalog.find_by_name("tavern").map(|c| c.cost), Some(1));
        assert!(catalog.find_by_name("Castle").is_none());
    }
}
