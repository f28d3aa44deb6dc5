//! Core engine types: entities, players, state, actions, RNG, configuration.
//!
//! This module contains the building blocks every other module uses. The
//! snapshot (`GameState`) is plain data; behaviour lives in `engine`.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;

pub use entity::{EntityId, Target};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{ConfigError, EngineConfig, Phase};
pub use action::Action;
pub use state::{GameState, PlayerState, TurnInfo};
