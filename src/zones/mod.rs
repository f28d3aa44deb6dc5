//! Zone system for card locations.
//!
//! Every player has a library, hand, battlefield, graveyard, exile, stack
//! and command zone. Contents are ordered sequences of entity ids.
//!
//! ## Key Types
//!
//! - `Zone`: Which zone
//! - `Location`: A `(player, zone)` pair
//! - `ZoneManager`: Persistent location tracking and movement
//! - `ZonePosition`: Position specifier for insertion

pub mod manager;

pub use manager::{Location, Zone, ZoneManager, ZonePosition};
