//! Engine configuration.
//!
//! Hosts configure the engine at startup with an [`EngineConfig`], either
//! through the builder methods or by loading JSON:
//!
//! ```
//! use ccg_rules::core::EngineConfig;
//!
//! let config = EngineConfig::from_json(r#"{ "player_count": 3, "starting_life": 30 }"#).unwrap();
//! assert_eq!(config.player_count, 3);
//! assert_eq!(config.starting_life, 30);
//! assert_eq!(config.max_chain_depth, EngineConfig::DEFAULT_MAX_CHAIN_DEPTH);
//! ```

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("player count must be between 1 and 255 (got {0})")]
    PlayerCount(usize),

    #[error("max chain depth must be positive")]
    ChainDepth,

    #[error("creature type vocabulary must not be empty")]
    EmptyCreatureTypes,
}

/// Turn phase, carried on decisions as provenance.
///
/// The engine does not run the turn structure; the host stamps the phase
/// into the snapshot and the engine copies it onto every decision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Beginning,
    #[default]
    PrecombatMain,
    Combat,
    PostcombatMain,
    Ending,
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Life total each player starts with.
    pub starting_life: i64,

    /// Maximum number of work frames the chain driver runs for one input.
    ///
    /// A composite effect that keeps re-queueing itself would otherwise
    /// spin forever; exceeding this aborts the input with an error.
    pub max_chain_depth: usize,

    /// Creature types offered when a player is asked to name one.
    pub creature_types: Vec<String>,

    /// Seed for the snapshot RNG.
    pub seed: u64,
}

impl EngineConfig {
    /// Default chain-driver guard.
    pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 1024;

    /// Create a configuration for `player_count` players with defaults.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            ..Self::default()
        }
    }

    /// Parse and validate a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.player_count == 0 || self.player_count > 255 {
            return Err(ConfigError::PlayerCount(self.player_count));
        }
        if self.max_chain_depth == 0 {
            return Err(ConfigError::ChainDepth);
        }
        if self.creature_types.is_empty() {
            return Err(ConfigError::EmptyCreatureTypes);
        }
        Ok(())
    }

    /// Set the starting life total.
    #[must_use]
    pub fn with_starting_life(mut self, life: i64) -> Self {
        self.starting_life = life;
        self
    }

    /// Set the chain-driver guard.
    #[must_use]
    pub fn with_max_chain_depth(mut self, depth: usize) -> Self {
        self.max_chain_depth = depth;
        self
    }

    /// Replace the creature type vocabulary.
    #[must_use]
    pub fn with_creature_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.creature_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            player_count: 2,
            starting_life: 20,
            max_chain_depth: Self::DEFAULT_MAX_CHAIN_DEPTH,
            creature_types: ["Human", "Elf", "Goblin", "Zombie", "Merfolk", "Dragon", "Soldier", "Wizard"]
                .into_iter()
                .map(String::from)
                .collect(),
            seed: 0,
        }
    }
}
