//! Entity identification.
//!
//! Every game object (card, token, spell or ability on the stack) has a
//! unique `EntityId`. Players are addressed separately by `PlayerId`;
//! anything that can be either uses [`Target`].
//!
//! Ids are allocated by the snapshot and never reused, so a stale id held
//! by a suspended continuation can only resolve to the object it named or
//! to nothing at all.
//!
//! ```
//! use ccg_rules::core::{EntityId, PlayerId, Target};
//!
//! let card = EntityId(10);
//! let target = Target::Object(card);
//! assert_eq!(target.as_object(), Some(card));
//! assert_eq!(Target::Player(PlayerId::new(1)).as_player(), Some(PlayerId::new(1)));
//! ```

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Unique identifier for any non-player game entity.
///
/// Ordered so that persistent maps keyed by it iterate deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Something an effect can point at: a player or a game object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Target {
    /// A player.
    Player(PlayerId),
    /// A card, token, or stack object.
    Object(EntityId),
}

impl Target {
    /// The player, if this target is one.
    #[must_use]
    pub const fn as_player(self) -> Option<PlayerId> {
        match self {
            Target::Player(p) => Some(p),
            Target::Object(_) => None,
        }
    }

    /// The object, if this target is one.
    #[must_use]
    pub const fn as_object(self) -> Option<EntityId> {
        match self {
            Target::Object(e) => Some(e),
            Target::Player(_) => None,
        }
    }
}

impl From<PlayerId> for Target {
    fn from(player: PlayerId) -> Self {
        Target::Player(player)
    }
}

impl From<EntityId> for Target {
    fn from(entity: EntityId) -> Self {
        Target::Object(entity)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Target::Player(p) => write!(f, "{p}"),
            Target::Object(e) => write!(f, "{e}"),
        }
    }
}
