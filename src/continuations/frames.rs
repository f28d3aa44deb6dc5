//! Continuation frame records.
//!
//! One record per paused shape. Frames are plain data: effects, contexts,
//! entity ids and poll state. They never hold closures, so a paused snapshot
//! serializes completely.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};
use crate::effects::{
    Amount, CardFilter, CreatureTypeOutcome, Effect, EffectContext, LibraryEnd, Mode, TargetRequirement,
};
use crate::stack::StackObject;

use super::poll::PlayerPoll;

// === Work frames ===

/// The rest of a composite effect, waiting beneath a paused sub-effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SequenceFrame {
    pub remaining: Vector<Effect>,
    pub ctx: EffectContext,
}

/// Cleanup for a stack object whose effect paused mid-resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinishFrame {
    pub object: StackObject,
}

// === Choice family ===

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MayFrame {
    pub effect: Effect,
    pub otherwise: Option<Effect>,
    pub ctx: EffectContext,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModeFrame {
    pub modes: Vec<Mode>,
    pub ctx: EffectContext,
}

/// Shared by colour and number choices: run `effect` once the value is
/// recorded in the context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChoiceFrame {
    pub effect: Effect,
    pub ctx: EffectContext,
}

// === Targeting ===

/// What happens once targets are chosen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum TargetFollowUp {
    /// Run an effect with the targets.
    Execute(Effect),
    /// Finish announcing a stack object (then pay `cost`, if any).
    PutOnStack { object: StackObject, cost: Option<u32> },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetFrame {
    pub requirement: TargetRequirement,
    pub follow_up: TargetFollowUp,
    pub ctx: EffectContext,
}

// === Mana ===

/// What happens once a mana payment is resolved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ManaFollowUp {
    /// Run `paid` or `unpaid` depending on the result.
    Branches { paid: Option<Effect>, unpaid: Option<Effect>, ctx: EffectContext },
    /// Push the stack object if paid; drop it if not.
    PutOnStack { object: StackObject },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManaFrame {
    pub payer: PlayerId,
    /// Mana to take from the pool once sources are confirmed.
    pub from_pool: u32,
    /// Mana the chosen sources must cover.
    pub from_sources: u32,
    pub follow_up: ManaFollowUp,
}

// === Polls ===

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BidFrame {
    pub poll: PlayerPoll<u32>,
    pub cap: Option<u32>,
    pub ctx: EffectContext,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PutFromHandFrame {
    pub poll: PlayerPoll<Option<EntityId>>,
    pub filter: CardFilter,
    pub ctx: EffectContext,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CreatureTypeFrame {
    pub poll: PlayerPoll<String>,
    /// The types offered to the player being asked.
    pub options: Vec<String>,
    pub outcome: CreatureTypeOutcome,
    pub ctx: EffectContext,
}

/// One player's settled answer to "discard unless you pay life".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscardOrLifeAnswer {
    PayLife,
    Discard(EntityId),
    /// Declined to pay and had nothing to discard.
    Nothing,
}

/// Which question the pending player of a discard-or-life poll is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiscardOrLifeStage {
    /// "Pay N life?"
    OfferLife,
    /// "Choose a card to discard."
    ChooseDiscard,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscardOrLifeFrame {
    pub poll: PlayerPoll<DiscardOrLifeAnswer>,
    pub stage: DiscardOrLifeStage,
    pub life: u32,
    pub ctx: EffectContext,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiscardFrame {
    pub player: PlayerId,
    /// Cards still owed.
    pub count: u32,
    pub ctx: EffectContext,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SacrificeFrame {
    pub poll: PlayerPoll<EntityId>,
    pub filter: CardFilter,
    pub ctx: EffectContext,
}

// === Placement and ordering ===

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuraFrame {
    pub player: PlayerId,
    /// Aura being placed now.
    pub current: EntityId,
    /// Auras still to place, in order.
    pub remaining: Vector<EntityId>,
    pub ctx: EffectContext,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DivideFrame {
    pub amount: Amount,
    pub ctx: EffectContext,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderFrame {
    pub player: PlayerId,
    pub objects: Vec<EntityId>,
    pub to: LibraryEnd,
    pub ctx: EffectContext,
}
