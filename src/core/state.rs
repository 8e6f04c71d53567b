//! Game state: the player records and the shared table.
//!
//! ## Player
//!
//! Per-seat mutable record. Gold is unsigned and every spend is checked, so a
//! balance can never go negative; the city refuses duplicate names.
//!
//! ## GameState
//!
//! Everything that persists across rounds:
//! - Player records, in seating order
//! - The catalog
//! - The crowned seat
//! - The table RNG

use serde::{Deserialize, Serialize};

use super::error::{BuildError, SpendError};
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::cards::{BuildingCard, Role};
use crate::zones::{Catalog, City};

/// One seat's mutable record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    gold: u32,
    hand: Vec<BuildingCard>,
    city: City,
    role: Option<Role>,
    incapacitated: bool,
    receives_crown: bool,
}

impl Player {
    /// Create a player with an empty hand and city.
    #[must_use]
    pub fn new(name: impl Into<String>, gold: u32) -> Self {
        Self {
            name: name.into(),
            gold,
            hand: Vec::new(),
            city: City::new(),
            role: None,
            incapacitated: false,
            receives_crown: false,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    // === Gold ===

    /// Current balance.
    #[must_use]
    pub fn gold(&self) -> u32 {
        self.gold
    }

    /// Add gold.
    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    /// Spend gold, refusing (and changing nothing) if the balance is short.
    pub fn spend_gold(&mut self, amount: u32) -> Result<(), SpendError> {
        if self.gold < amount {
            return Err(SpendError {
                needed: amount,
                available: self.gold,
            });
        }
        self.gold -= amount;
        Ok(())
    }

    /// Empty the treasury, returning what was in it.
    pub fn take_all_gold(&mut self) -> u32 {
        std::mem::take(&mut self.gold)
    }

    // === Hand ===

    /// Cards in hand, in draw order.
    #[must_use]
    pub fn hand(&self) -> &[BuildingCard] {
        &self.hand
    }

    /// Add a card to the end of the hand.
    pub fn add_to_hand(&mut self, card: BuildingCard) {
        self.hand.push(card);
    }

    /// Remove and return the whole hand.
    pub fn take_hand(&mut self) -> Vec<BuildingCard> {
        std::mem::take(&mut self.hand)
    }

    /// Check whether the card at `index` could be built right now.
    pub fn can_build(&self, index: usize) -> Result<&BuildingCard, BuildError> {
        let card = self.hand.get(index).ok_or(BuildError::NoSuchCard(index))?;
        if self.city.contains_name(&card.name) {
            return Err(BuildError::DuplicateName(card.name.clone()));
        }
        if self.gold < card.cost {
            return Err(BuildError::InsufficientGold {
                cost: card.cost,
                gold: self.gold,
            });
        }
        Ok(card)
    }

    /// Build the card at hand position `index`: pay its cost and move it to
    /// the city. Refusals leave the player untouched.
    pub fn build_from_hand(&mut self, index: usize) -> Result<BuildingCard, BuildError> {
        let cost = self.can_build(index)?.cost;
        let card = self.hand.remove(index);
        self.gold -= cost;
        let built = card.clone();
        self.city.insert(card)?;
        Ok(built)
    }

    // === City ===

    /// Built districts.
    #[must_use]
    pub fn city(&self) -> &City {
        &self.city
    }

    /// Mutable access to the city for destruction effects and restores.
    pub fn city_mut(&mut self) -> &mut City {
        &mut self.city
    }

    /// Whether a district of this name is built.
    #[must_use]
    pub fn has_built(&self, name: &str) -> bool {
        self.city.contains_name(name)
    }

    // === Round status ===

    /// Role held this round.
    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.role
    }

    /// Assign this round's role. Clears incapacitation.
    pub fn assign_role(&mut self, role: Role) {
        self.role = Some(role);
        self.incapacitated = false;
    }

    /// Drop the role at the end of a round.
    pub fn clear_role(&mut self) {
        self.role = None;
        self.incapacitated = false;
    }

    /// Whether the player lost this round's turn.
    #[must_use]
    pub fn is_incapacitated(&self) -> bool {
        self.incapacitated
    }

    /// Remove the player from play for the rest of the round.
    pub fn incapacitate(&mut self) {
        self.incapacitated = true;
    }

    /// Whether the player takes the crown next round.
    #[must_use]
    pub fn receives_crown(&self) -> bool {
        self.receives_crown
    }

    /// Flag the player to take the crown next round.
    pub fn grant_crown(&mut self) {
        self.receives_crown = true;
    }

    /// Read and clear the crown flag.
    pub fn take_crown_flag(&mut self) -> bool {
        std::mem::take(&mut self.receives_crown)
    }
}

/// Complete table state.
#[derive(Clone, Debug)]
pub struct GameState {
    /// Player records in seating order.
    pub players: PlayerMap<Player>,

    /// The shared building supply.
    pub catalog: Catalog,

    /// Seat that opens the draft.
    pub crowned: PlayerId,

    /// Rounds started so far.
    pub round: u32,

    /// City size that ends the game.
    pub win_threshold: usize,

    /// Diagnostics toggle: log computer hands and balances.
    pub debug: bool,

    /// Table RNG (shuffles, draft, initial crown).
    pub rng: GameRng,
}

impl GameState {
    /// Create a table from seated players.
    #[must_use]
    pub fn new(players: Vec<Player>, catalog: Catalog, crowned: PlayerId, win_threshold: usize, rng: GameRng) -> Self {
        let players = PlayerMap::from_vec(players);
        assert!(crowned.index() < players.player_count(), "Crowned seat out of range");

        Self {
            players,
            catalog,
            crowned,
            round: 0,
            win_threshold,
            debug: false,
            rng,
        }
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// A player's record.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id]
    }

    /// A player's mutable record.
    pub fn player_mut(&mut self, id: PlayerId) -> &mut Player {
        &mut self.players[id]
    }

    /// The seat holding `role` this round, if anyone drafted it.
    #[must_use]
    pub fn holder_of(&self, role: Role) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|(_, p)| p.role() == Some(role))
            .map(|(id, _)| id)
    }

    /// Every seat's role this round.
    #[must_use]
    pub fn roles(&self) -> PlayerMap<Option<Role>> {
        PlayerMap::new(self.player_count(), |id| self.players[id].role())
    }

    /// Draw up to `count` cards from the catalog into a hand.
    ///
    /// Returns how many were actually drawn.
    pub fn draw_into_hand(&mut self, id: PlayerId, count: usize) -> usize {
        let cards = self.catalog.draw_up_to(count);
        let drawn = cards.len();
        for card in cards {
            self.players[id].add_to_hand(card);
        }
        drawn
    }

    /// Whether a city has reached the size that ends the game.
    #[must_use]
    pub fn has_complete_city(&self, id: PlayerId) -> bool {
        self.players[id].city().len() >= self.win_threshold
    }

    /// Total physical buildings across catalog, hands and cities.
    #[must_use]
    pub fn building_count(&self) -> usize {
        self.catalog.len()
            + self
                .players
                .values()
                .map(|p| p.hand().len() + p.city().len())
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, Color};

    fn card(id: u32, name: &str, cost: u32) -> BuildingCard {
        BuildingCard::new(CardId::new(id), name, Color::Green, cost, "")
    }

    #[test]
    fn test_add_gold() {
        let mut player = Player::new("TestPlayer", 2);
        player.add_gold(3);
        assert_eq!(player.gold(), 5);
    }

    #[test]
    fn test_spend_gold_sufficient() {
        let mut player = Player::new("TestPlayer", 2);
        assert!(player.spend_gold(1).is_ok());
        assert_eq!(player.gold(), 1);
    }

    #[test]
    fn test_spend_gold_insufficient_is_refused() {
        let mut player = Player::new("TestPlayer", 2);
        let err = player.spend_gold(5).unwrap_err();
        assert_eq!(err, SpendError { needed: 5, available: 2 });
        assert_eq!(player.gold(), 2);
    }

    #[test]
    fn test_build_success_moves_card() {
        let mut player = Player::new("TestPlayer", 2);
        player.add_to_hand(card(1, "Market", 2));

        let built = player.build_from_hand(0).unwrap();
        assert_eq!(built.name, "Market");
        assert_eq!(player.gold(), 0);
        assert!(player.hand().is_empty());
        assert!(player.has_built("Market"));
    }

    #[test]
    fn test_build_without_gold_is_refused() {
        let mut player = Player::new("TestPlayer", 2);
        player.add_to_hand(card(1, "Castle", 4));

        let err = player.build_from_hand(0).unwrap_err();
        assert_eq!(err, BuildError::InsufficientGold { cost: 4, gold: 2 });
        assert_eq!(player.hand().len(), 1);
        assert_eq!(player.gold(), 2);
    }

    #[test]
    fn test_build_duplicate_name_is_refused() {
        let mut player = Player::new("TestPlayer", 10);
        player.add_to_hand(card(1, "Church", 2));
        player.add_to_hand(card(2, "Church", 2));

        player.build_from_hand(0).unwrap();
        let err = player.build_from_hand(0).unwrap_err();
        assert_eq!(err, BuildError::DuplicateName("Church".to_string()));
        assert_eq!(player.gold(), 8);
        assert_eq!(player.hand().len(), 1);
    }

    #[test]
    fn test_build_bad_index() {
        let mut player = Player::new("TestPlayer", 10);
        assert_eq!(player.build_from_hand(3).unwrap_err(), BuildError::NoSuchCard(3));
    }

    #[test]
    fn test_assign_role_clears_incapacitation() {
        let mut player = Player::new("TestPlayer", 2);
        player.assign_role(Role::King);
        player.incapacitate();
        assert!(player.is_incapacitated());

        player.assign_role(Role::Bishop);
        assert!(!player.is_incapacitated());
        assert_eq!(player.role(), Some(Role::Bishop));
    }

    #[test]
    fn test_take_all_gold() {
        let mut player = Player::new("TestPlayer", 6);
        assert_eq!(player.take_all_gold(), 6);
        assert_eq!(player.gold(), 0);
    }

    #[test]
    fn test_crown_flag_is_consumed() {
        let mut player = Player::new("TestPlayer", 2);
        player.grant_crown();
        assert!(player.take_crown_flag());
        assert!(!player.take_crown_flag());
    }

    #[test]
    fn test_holder_of_and_draw() {
        let mut catalog = Catalog::new();
        catalog.supply("Tavern", Color::Green, 1, "", 3);
        let players = (1..=4).map(|i| Player::new(format!("Player {i}"), 2)).collect();
        let mut state = GameState::new(players, catalog, PlayerId::new(0), 8, GameRng::new(1));

        state.player_mut(PlayerId::new(2)).assign_role(Role::Thief);
        assert_eq!(state.holder_of(Role::Thief), Some(PlayerId::new(2)));
        assert_eq!(state.holder_of(Role::King), None);

        let before = state.building_count();
        assert_eq!(state.draw_into_hand(PlayerId::new(1), 5), 3);
        assert_eq!(state.building_count(), before);
        assert!(state.catalog.is_empty());
    }
}
