//! Role abilities: planning, resolution and outcomes.
//!
//! - `ability`: the closed set of per-role actions and their outcomes
//! - `resolver`: target computation and once-per-round resolution

mod ability;
pub mod resolver;

pub use ability::{AbilityAction, AbilityOutcome, DemolitionTarget};
pub use resolver::resolve;
