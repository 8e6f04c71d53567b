//! Save and restore.

mod snapshot;

pub use snapshot::{PlayerSnapshot, Snapshot, SNAPSHOT_VERSION};
