//! Effect system for card game actions.
//!
//! Effects are the building blocks of abilities:
//! - `Effect`: What an ability does, as data
//! - `EffectContext`: Controller, source and choices made so far
//! - `TargetRequirement`/`TargetFinder`: Legal target computation
//! - `EffectExecutor`: Turns an effect into an outcome
//! - `primitives`: Snapshot mutations shared by effects and resumers
//!
//! ## Design Philosophy
//!
//! Effects never hold closures. Anything that must survive a pause (the
//! rest of a sequence, the chosen targets, an X value) is data, so paused
//! snapshots serialize.

mod effect;
mod context;
mod targeting;
mod resolver;
pub mod primitives;

pub use effect::{Amount, CreatureTypeOutcome, Effect, LibraryEnd, ManaColor, Mode, PlayerSet, TargetRef};
pub use context::EffectContext;
pub use targeting::{
    CardFilter, StandardTargetFinder, TargetCount, TargetFilter, TargetFinder, TargetKind, TargetRequirement,
};
pub use resolver::{EffectExecutor, StandardEffects};
