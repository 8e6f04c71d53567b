//! Table snapshots.
//!
//! A `Snapshot` holds what a saved game needs to continue: every player's
//! balance, role, hand and city, the crowned seat, and optionally the
//! catalog and RNG position. A restored table always resumes at the draft
//! of a fresh round, so per-round bookkeeping is not saved.
//!
//! Two encodings:
//! - JSON (`serde_json`), human-readable, the default
//! - bincode, compact, chosen by a `.bin` file extension

use std::fs;
use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::cards::{BuildingCard, Role};
use crate::core::{GameRngState, GameState, Player, PlayerId, SnapshotError, MAX_PLAYERS, MIN_PLAYERS};

/// Current snapshot format.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One player's saved record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub gold: u32,
    pub role: Option<Role>,
    pub hand: Vec<BuildingCard>,
    pub built: Vec<BuildingCard>,
}

impl PlayerSnapshot {
    fn capture(player: &Player) -> Self {
        Self {
            name: player.name().to_string(),
            gold: player.gold(),
            role: player.role(),
            hand: player.hand().to_vec(),
            built: player.city().iter().cloned().collect(),
        }
    }

    /// Rebuild the player record, saved role included.
    pub fn to_player(&self) -> Result<Player, SnapshotError> {
        let mut player = Player::new(self.name.clone(), self.gold);
        if let Some(role) = self.role {
            player.assign_role(role);
        }
        for card in &self.hand {
            player.add_to_hand(card.clone());
        }
        for card in &self.built {
            player.city_mut().insert(card.clone()).map_err(|_| SnapshotError::DuplicateBuilt {
                player: self.name.clone(),
                name: card.name.clone(),
            })?;
        }
        Ok(player)
    }
}

/// A saved table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub round: u32,
    pub crowned: usize,
    pub players: Vec<PlayerSnapshot>,
    #[serde(default)]
    pub catalog: Option<Vec<BuildingCard>>,
    #[serde(default)]
    pub rng: Option<GameRngState>,
}

impl Snapshot {
    /// Capture the whole table, catalog and RNG included.
    #[must_use]
    pub fn capture(state: &GameState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            round: state.round,
            crowned: state.crowned.index(),
            players: state.players.values().map(PlayerSnapshot::capture).collect(),
            catalog: Some(state.catalog.iter().cloned().collect()),
            rng: Some(state.rng.state()),
        }
    }

    /// Check the invariants a live table relies on.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let count = self.players.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(SnapshotError::PlayerCount(count));
        }
        if self.crowned >= count {
            return Err(SnapshotError::CrownedOutOfRange {
                crowned: self.crowned,
                player_count: count,
            });
        }

        let mut roles = FxHashSet::default();
        for player in &self.players {
            if let Some(role) = player.role {
                if !roles.insert(role) {
                    return Err(SnapshotError::DuplicateRole { role });
                }
            }
            let mut names = FxHashSet::default();
            for card in &player.built {
                if !names.insert(card.name.as_str()) {
                    return Err(SnapshotError::DuplicateBuilt {
                        player: player.name.clone(),
                        name: card.name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validate, and check the saved table fits `seated` seats.
    pub fn validate_for(&self, seated: usize) -> Result<(), SnapshotError> {
        self.validate()?;
        if self.players.len() != seated {
            return Err(SnapshotError::SeatMismatch {
                saved: self.players.len(),
                seated,
            });
        }
        Ok(())
    }

    /// The crowned seat.
    #[must_use]
    pub fn crowned_seat(&self) -> PlayerId {
        PlayerId::new(self.crowned as u8)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Compact binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        Ok(bincode::deserialize(bytes)?)
    }

    /// Write to `path`; `.bin` files get bincode, anything else JSON.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let bytes = if is_binary(path) {
            self.to_bytes()?
        } else {
            self.to_json()?.into_bytes()
        };
        fs::write(path, bytes).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and validate a snapshot from `path`.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let io_err = |source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        };
        let snapshot = if is_binary(path) {
            Self::from_bytes(&fs::read(path).map_err(io_err)?)?
        } else {
            Self::from_json(&fs::read_to_string(path).map_err(io_err)?)?
        };
        snapshot.validate()?;
        Ok(snapshot)
    }
}

fn is_binary(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "bin")
}
