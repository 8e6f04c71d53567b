//! Table configuration.
//!
//! `GameConfig` fixes everything decided before the first draft: how many
//! seats, which one is human, the seed, and the handful of numeric rules
//! (starting gold, starting hand, city size that ends the game).

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use super::PlayerId;

/// Smallest supported table.
pub const MIN_PLAYERS: usize = 4;

/// Largest supported table.
pub const MAX_PLAYERS: usize = 7;

/// Table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (4-7).
    pub player_count: usize,

    /// The interactive seat, if any. `None` runs an all-computer table.
    pub human_seat: Option<PlayerId>,

    /// Seed for every random decision in the game.
    pub seed: u64,

    /// Gold each player starts with.
    pub starting_gold: u32,

    /// Cards dealt to each player before the first round.
    pub starting_hand: usize,

    /// City size that ends the game at the end of the round.
    pub win_threshold: usize,

    /// Rounds after which the game is scored regardless (0 = unlimited).
    /// Guards against tables where nobody can finish a city.
    pub max_rounds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_count: 4,
            human_seat: Some(PlayerId::new(0)),
            seed: 42,
            starting_gold: 2,
            starting_hand: 4,
            win_threshold: 8,
            max_rounds: 200,
        }
    }
}

impl GameConfig {
    /// Set the number of seats.
    #[must_use]
    pub fn with_players(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set (or clear) the interactive seat.
    #[must_use]
    pub fn with_human_seat(mut self, seat: Option<PlayerId>) -> Self {
        self.human_seat = seat;
        self
    }

    /// Set the round limit.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the city size that ends the game.
    #[must_use]
    pub fn with_win_threshold(mut self, threshold: usize) -> Self {
        self.win_threshold = threshold;
        self
    }

    /// Check the configuration before any round is played.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.player_count) {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if let Some(seat) = self.human_seat {
            if seat.index() >= self.player_count {
                return Err(ConfigError::HumanSeat {
                    seat: seat.index(),
                    player_count: self.player_count,
                });
            }
        }
        if self.win_threshold == 0 {
            return Err(ConfigError::WinThreshold);
        }
        Ok(())
    }

    /// Build configuration from defaults overlaid with environment variables.
    ///
    /// Environment variables:
    /// - `CITADELS_PLAYERS` - Number of seats (default: 4)
    /// - `CITADELS_SEED` - RNG seed (default: 42)
    /// - `CITADELS_MAX_ROUNDS` - Round limit, 0 for none (default: 200)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(players) = read_env::<usize>("CITADELS_PLAYERS") {
            config.player_count = players;
        }
        if let Some(seed) = read_env::<u64>("CITADELS_SEED") {
            config.seed = seed;
        }
        if let Some(rounds) = read_env::<u32>("CITADELS_MAX_ROUNDS") {
            config.max_rounds = rounds;
        }

        config
    }
}

fn read_env<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|value| value.trim().parse().ok())
}
