//! Game event types.
//!
//! Events record what happened while the engine processed one input. They
//! are returned alongside every outcome so the host can animate, log, or
//! detect triggers; the engine itself never reads them back.

use serde::{Deserialize, Serialize};

use crate::cards::{Color, CounterKind};
use crate::core::{EntityId, PlayerId, Target};
use crate::decisions::DecisionId;
use crate::zones::Location;

/// Events produced by one call into the engine, in order.
pub type EventLog = Vec<GameEvent>;

/// Something that happened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Decisions ===

    /// The engine paused for a decision.
    DecisionRequested { decision: DecisionId, player: PlayerId, kind: String },
    /// A pending decision was answered.
    DecisionAnswered { decision: DecisionId, player: PlayerId },

    // === Life and damage ===

    DamageDealt { source: Option<EntityId>, target: Target, amount: u32 },
    LifeLost { player: PlayerId, amount: u32 },
    LifeGained { player: PlayerId, amount: u32 },
    PlayerLost { player: PlayerId },

    // === Objects ===

    ZoneChanged { entity: EntityId, from: Location, to: Location },
    CardDrawn { player: PlayerId, card: EntityId },
    Discarded { player: PlayerId, card: EntityId },
    Destroyed { entity: EntityId },
    Sacrificed { player: PlayerId, entity: EntityId },
    Tapped { entity: EntityId },
    Untapped { entity: EntityId },
    CountersAdded { entity: EntityId, kind: CounterKind, count: u32 },
    AuraAttached { aura: EntityId, to: EntityId },
    /// A player put library cards back in a chosen order.
    CardsReordered { player: PlayerId, cards: Vec<EntityId> },

    // === Mana ===

    ManaAdded { player: PlayerId, color: Color, amount: u32 },
    ManaPaid { player: PlayerId, amount: u32, sources: Vec<EntityId> },
    PaymentDeclined { player: PlayerId },

    // === Choices ===

    ModeChosen { player: PlayerId, index: usize },
    ColorChosen { player: PlayerId, color: Color },
    NumberChosen { player: PlayerId, value: u32 },
    TargetsChosen { player: PlayerId, targets: Vec<Target> },
    BidRevealed { player: PlayerId, bid: u32 },
    CreatureTypeChosen { player: PlayerId, creature_type: String },

    // === Stack ===

    StackObjectPushed { id: EntityId, controller: PlayerId },
    StackObjectResolved { id: EntityId },
    /// A stack object left the stack without resolving because every
    /// target became illegal.
    Fizzled { id: EntityId },
    SpellCountered { id: EntityId },

    // === Continuous ===

    ContinuousEffectCreated { timestamp: u64 },

    /// Part of an effect did nothing, e.g. a referenced object was gone.
    ActionSkipped { reason: String },
}

impl GameEvent {
    /// Shorthand for a skip event.
    pub fn skipped(reason: impl Into<String>) -> Self {
        GameEvent::ActionSkipped { reason: reason.into() }
    }

    /// The player most directly involved, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::DecisionRequested { player, .. }
            | GameEvent::DecisionAnswered { player, .. }
            | GameEvent::LifeLost { player, .. }
            | GameEvent::LifeGained { player, .. }
            | GameEvent::PlayerLost { player }
            | GameEvent::CardDrawn { player, .. }
            | GameEvent::Discarded { player, .. }
            | GameEvent::Sacrificed { player, .. }
            | GameEvent::CardsReordered { player, .. }
            | GameEvent::ManaAdded { player, .. }
            | GameEvent::ManaPaid { player, .. }
            | GameEvent::PaymentDeclined { player }
            | GameEvent::ModeChosen { player, .. }
            | GameEvent::ColorChosen { player, .. }
            | GameEvent::NumberChosen { player, .. }
            | GameEvent::TargetsChosen { player, .. }
            | GameEvent::BidRevealed { player, .. }
            | GameEvent::CreatureTypeChosen { player, .. }
            | GameEvent::StackObjectPushed { controller: player, .. } => Some(*player),
            GameEvent::DamageDealt { target, .. } => target.as_player(),
            _ => None,
        }
    }
}
