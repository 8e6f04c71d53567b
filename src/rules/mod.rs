//! The round engine.
//!
//! - `draft`: role shuffle, withholding and picking
//! - `turn`: rank-ordered turns (income, builds, ability, command window)
//! - `scoring`: final scores and the winner
//! - `round`: per-round bookkeeping and the context passed to every phase
//! - `game`: setup, the round loop and the end-of-game check

pub mod draft;
pub mod game;
pub mod round;
pub mod scoring;
pub mod turn;

pub use draft::Draft;
pub use game::{GameEngine, GameOutcome};
pub use round::{RoundContext, RoundState, Seats};
pub use scoring::{final_scores, score_player, winner, ScoreBreakdown};
