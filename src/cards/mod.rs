//! Card definitions: building cards, the role registry, and card-list loading.

mod building;
mod role;
pub mod source;

pub use building::{BuildingCard, CardId, Color, UnknownColor};
pub use role::{Role, UnknownRole};
