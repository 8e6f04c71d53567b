//! Card zones: the shared catalog and each player's city.
//!
//! Hands are plain ordered lists on the player record; the catalog and the
//! city carry rules of their own (draw/return ordering, name uniqueness).

mod catalog;
mod city;

pub use catalog::Catalog;
pub use city::City;
