//! Observation: the ordered event stream and its subscribers.

mod bus;
mod event;

pub use bus::{EventBus, EventSink};
pub use event::{EndReason, GameEvent};
