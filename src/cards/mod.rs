//! Card system: printed card data and per-entity component sets.
//!
//! ## Key Types
//!
//! - `CardData`: Printed characteristics (name, types, subtypes, colors)
//! - `ComponentSet`: Runtime facts about one entity (controller, tapped,
//!   counters, damage, attachment)
//! - `Color`, `CardType`, `Keyword`, `CounterKind`: closed vocabularies
//!
//! Loading card content is the host's job; the engine only reads these.

pub mod attributes;
pub mod definition;
pub mod instance;

pub use attributes::{CardType, Color, CounterKind, Keyword};
pub use definition::CardData;
pub use instance::ComponentSet;
