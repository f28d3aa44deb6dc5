//! Events emitted while processing an input.

pub mod event;

pub use event::{EventLog, GameEvent};
