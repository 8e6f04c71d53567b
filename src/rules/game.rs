//! The round loop.
//!
//! `GameEngine` owns the table, the seats and the event bus:
//! - Setup: validate the configuration, shuffle, deal, pick the first crown
//! - Each round: draft, walk the ranks, pass the crown
//! - End: score once, at the end of the round in which a city was completed
//!   (or when the round limit is hit)

use crate::cards::Role;
use crate::core::{ConfigError, GameConfig, GameError, GameRng, GameState, Player, PlayerId, PlayerMap, SnapshotError};
use crate::events::{EndReason, EventBus, EventSink, GameEvent};
use crate::persist::Snapshot;
use crate::policy::DecisionPolicy;
use crate::zones::Catalog;

use super::draft;
use super::round::{RoundContext, RoundState, Seats};
use super::scoring::{self, ScoreBreakdown};
use super::turn;

/// How a finished game came out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameOutcome {
    /// Scores in seating order.
    pub scores: Vec<ScoreBreakdown>,
    pub winner: Option<PlayerId>,
    pub reason: EndReason,
    /// Rounds played.
    pub rounds: u32,
}

/// Runs a game from setup to scoring.
pub struct GameEngine {
    config: GameConfig,
    state: GameState,
    seats: Seats,
    events: EventBus,
    outcome: Option<GameOutcome>,
}

impl GameEngine {
    /// Set up a table: one policy per seat, in seating order.
    pub fn new(
        config: GameConfig,
        mut catalog: Catalog,
        seats: Vec<Box<dyn DecisionPolicy>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if seats.len() != config.player_count {
            return Err(ConfigError::SeatCount {
                expected: config.player_count,
                actual: seats.len(),
            });
        }
        if catalog.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        let mut rng = GameRng::new(config.seed);
        catalog.shuffle(&mut rng);
        let crowned = PlayerId::new(rng.gen_index(config.player_count) as u8);

        let players = PlayerId::all(config.player_count)
            .map(|id| Player::new(id.to_string(), config.starting_gold))
            .collect();
        let mut state = GameState::new(players, catalog, crowned, config.win_threshold, rng);
        for id in PlayerId::all(config.player_count) {
            state.draw_into_hand(id, config.starting_hand);
        }

        tracing::info!(
            players = config.player_count,
            seed = config.seed,
            %crowned,
            catalog = state.catalog.len(),
            "table ready"
        );

        Ok(Self {
            config,
            state,
            seats: PlayerMap::from_vec(seats),
            events: EventBus::new(),
            outcome: None,
        })
    }

    /// Add an event subscriber.
    pub fn subscribe(&mut self, sink: Box<dyn EventSink>) {
        self.events.subscribe(sink);
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct table access, for setting up scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// The result, once the game is over.
    #[must_use]
    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Play one round. Returns the outcome if the game ended with it.
    pub fn play_round(&mut self) -> Result<Option<GameOutcome>, GameError> {
        if self.outcome.is_some() {
            return Err(GameError::GameOver);
        }

        self.state.round += 1;
        let mut round = RoundState::new(self.state.round);
        tracing::info!(round = round.number, crowned = %self.state.crowned, "round started");
        self.events.publish(
            GameEvent::RoundStarted {
                round: round.number,
                crowned: self.state.crowned,
            },
            &self.state,
        );

        {
            let mut cx = RoundContext::new(&mut self.state, &mut self.seats, &mut self.events, &mut round);
            draft::run(&mut cx)?;
            turn::play_turns(&mut cx);
            cx.emit(GameEvent::RoundEnded { round: cx.round.number });
        }

        if let Some(snapshot) = round.restore.take() {
            self.restore(&snapshot)?;
            return Ok(None);
        }

        self.pass_crown();

        let reason = if round.is_final() {
            Some(EndReason::CityCompleted)
        } else if self.config.max_rounds > 0 && self.state.round >= self.config.max_rounds {
            tracing::warn!(rounds = self.state.round, "round limit reached");
            Some(EndReason::RoundLimit)
        } else {
            None
        };

        let outcome = reason.map(|reason| self.finish(&round, reason));
        for (_, player) in self.state.players.iter_mut() {
            player.clear_role();
        }
        Ok(outcome)
    }

    /// Play rounds until the game ends.
    pub fn run(&mut self) -> Result<GameOutcome, GameError> {
        loop {
            if let Some(outcome) = self.play_round()? {
                return Ok(outcome);
            }
        }
    }

    /// Replace the table with a saved one. Play resumes at the next draft,
    /// which reassigns the saved roles.
    ///
    /// Without a saved catalog the live one is kept, and the saved hands and
    /// cities are renumbered from it so instance ids stay unique.
    pub fn restore(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        snapshot.validate_for(self.state.player_count())?;

        let mut saved = snapshot.players.clone();
        match &snapshot.catalog {
            Some(cards) => {
                let mut catalog = Catalog::from_cards(cards.clone());
                for card in saved.iter().flat_map(|p| p.hand.iter().chain(p.built.iter())) {
                    catalog.reserve_id(card.id);
                }
                self.state.catalog = catalog;
            }
            // The live catalog's ids know nothing of the saved cards.
            None => {
                for card in saved.iter_mut().flat_map(|p| p.hand.iter_mut().chain(p.built.iter_mut())) {
                    card.id = self.state.catalog.alloc_id();
                }
            }
        }

        let players = saved
            .iter()
            .map(|player| player.to_player())
            .collect::<Result<Vec<_>, _>>()?;
        self.state.players = PlayerMap::from_vec(players);
        self.state.crowned = snapshot.crowned_seat();
        self.state.round = snapshot.round;
        if let Some(rng) = &snapshot.rng {
            self.state.rng = GameRng::from_state(rng);
        }
        self.outcome = None;

        tracing::info!(round = snapshot.round, "table restored");
        self.events.publish(GameEvent::GameRestored, &self.state);
        Ok(())
    }

    /// Hand the crown to whoever the King flagged this round.
    fn pass_crown(&mut self) {
        let mut next = None;
        for (id, player) in self.state.players.iter_mut() {
            if player.take_crown_flag() {
                next = Some(id);
            }
        }
        if let Some(player) = next {
            self.state.crowned = player;
            self.events.publish(GameEvent::CrownPassed { player }, &self.state);
        }
    }

    fn finish(&mut self, round: &RoundState, reason: EndReason) -> GameOutcome {
        let roles: PlayerMap<Option<Role>> = self.state.roles();
        let scores = scoring::final_scores(&self.state, &round.completions);
        let winner = scoring::winner(&scores, &roles);
        tracing::info!(?winner, ?reason, rounds = self.state.round, "game over");

        self.events.publish(
            GameEvent::GameEnded {
                scores: scores.clone(),
                winner,
                reason,
            },
            &self.state,
        );

        let outcome = GameOutcome {
            scores,
            winner,
            reason,
            rounds: self.state.round,
        };
        self.outcome = Some(outcome.clone());
        outcome
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("config", &self.config)
            .field("round", &self.state.round)
            .field("events", &self.events)
            .field("outcome", &self.outcome)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::source::default_catalog;
    use crate::policy::computer_seats;

    fn engine(players: usize, seed: u64) -> GameEngine {
        let config = GameConfig::default()
            .with_players(players)
            .with_seed(seed)
            .with_human_seat(None);
        let seats = computer_seats(&config);
        GameEngine::new(config, default_catalog().unwrap(), seats).unwrap()
    }

    #[test]
    fn test_setup_deals_hands() {
        let engine = engine(5, 1);
        let state = engine.state();
        assert_eq!(state.player_count(), 5);
        for player in state.players.values() {
            assert_eq!(player.gold(), 2);
            assert_eq!(player.hand().len(), 4);
            assert!(player.role().is_none());
        }
        assert_eq!(state.catalog.len(), 72 - 20);
    }

    #[test]
    fn test_setup_rejects_bad_tables() {
        let config = GameConfig::default().with_players(3).with_human_seat(None);
        let err = GameEngine::new(config, default_catalog().unwrap(), vec![]).unwrap_err();
        assert_eq!(err, ConfigError::PlayerCount(3));

        let config = GameConfig::default().with_human_seat(None);
        let err = GameEngine::new(config.clone(), default_catalog().unwrap(), vec![]).unwrap_err();
        assert_eq!(err, ConfigError::SeatCount { expected: 4, actual: 0 });

        let seats = computer_seats(&config);
        let err = GameEngine::new(config, Catalog::new(), seats).unwrap_err();
        assert_eq!(err, ConfigError::EmptyCatalog);
    }

    #[test]
    fn test_round_assigns_and_clears_roles() {
        let mut engine = engine(4, 9);
        engine.play_round().unwrap();
        assert_eq!(engine.state().round, 1);
        assert!(engine.state().players.values().all(|p| p.role().is_none()));

        let assigned = engine
            .events()
            .history()
            .iter()
            .filter(|e| matches!(e, GameEvent::RoleAssigned { .. }))
            .count();
        assert_eq!(assigned, 4);
    }

    #[test]
    fn test_full_game_terminates() {
        let mut engine = engine(6, 21);
        let outcome = engine.run().unwrap();
        assert!(outcome.winner.is_some());
        assert_eq!(outcome.scores.len(), 6);
        assert!(matches!(engine.play_round(), Err(GameError::GameOver)));
    }

    #[test]
    fn test_round_limit_ends_game() {
        let config = GameConfig::default()
            .with_human_seat(None)
            .with_seed(4)
            .with_max_rounds(1);
        let seats = computer_seats(&config);
        let mut engine = GameEngine::new(config, default_catalog().unwrap(), seats).unwrap();
        let outcome = engine.play_round().unwrap().unwrap();
        assert_eq!(outcome.reason, EndReason::RoundLimit);
        assert_eq!(outcome.rounds, 1);
    }
}
