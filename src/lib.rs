//! # ccg-rules
//!
//! A resumable effect-execution engine for turn-based strategy card games.
//!
//! ## Design Principles
//!
//! 1. **Snapshots, not mutation**: every call takes a `GameState` snapshot and
//!    returns a new one inside an [`Outcome`]. Clones are O(1) via `im-rs`, so
//!    callers can keep any snapshot around and branch from it.
//!
//! 2. **Pause anywhere**: an effect that needs a player's choice returns
//!    `Outcome::Paused`. The rest of the work is stored in the
//!    snapshot as a stack of serializable [`Continuation`] frames, so a paused
//!    game can be saved, sent over the wire and resumed elsewhere.
//!
//! 3. **One decision at a time**: a snapshot carries at most one pending
//!    decision. New actions are refused until it is answered.
//!
//! ## Architecture
//!
//! - **Continuations**: a paused effect pushes a frame describing what to do
//!   with the answer. Remaining work (the rest of a sequence, stack cleanup)
//!   sits in work frames beneath it.
//!
//! - **Resumers**: one family per decision shape. A resumer re-checks the
//!   snapshot, applies the answer and either pauses again or hands control
//!   back to the chain driver.
//!
//! - **Chain driver**: `Engine::continue_chain` pops work frames until one
//!   pauses or the stack is empty, with a depth guard.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, players, state, actions, RNG, configuration
//! - `zones`: Zone contents and object locations
//! - `cards`: Card data attached to objects
//! - `layers`: Projected (effective) characteristics
//! - `effects`: Effect descriptions, contexts, targeting and primitives
//! - `decisions`: Decisions offered to players and their responses
//! - `events`: Events emitted by execution
//! - `continuations`: Serializable frames of paused work
//! - `resume`: Resumer families and the sequence runner
//! - `stack`: Spells and triggered abilities
//! - `engine`: The engine, outcomes and errors

pub mod core;
pub mod zones;
pub mod cards;
pub mod layers;
pub mod effects;
pub mod decisions;
pub mod events;
pub mod continuations;
pub mod resume;
pub mod stack;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Action, EngineConfig, EntityId, GameRng, GameRngState, GameState, Phase, PlayerId, PlayerMap, PlayerState, Target,
};

pub use crate::zones::{Location, Zone, ZoneManager, ZonePosition};

pub use crate::cards::{CardData, CardType, Color, ComponentSet};

pub use crate::layers::{FloatingEffect, LayerProjector, ProjectedView, Projector};

pub use crate::effects::{
    Amount, CardFilter, Effect, EffectContext, EffectExecutor, PlayerSet, StandardEffects, StandardTargetFinder,
    TargetFinder, TargetRef, TargetRequirement,
};

pub use crate::decisions::{Decision, DecisionId, DecisionKind, DecisionResponse};

pub use crate::events::{EventLog, GameEvent};

pub use crate::continuations::Continuation;

pub use crate::stack::{StackObject, StackObjectKind, TriggeredAbility};

pub use crate::engine::{Engine, EngineError, EngineResult, Outcome};
