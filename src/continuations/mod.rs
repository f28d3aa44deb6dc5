//! Continuation frames.
//!
//! When an effect pauses it pushes a `Continuation` onto the snapshot's
//! continuation stack. The topmost frame is the one the pending decision
//! belongs to. Frames beneath it are work the chain driver runs once the
//! decision is resolved.
//!
//! ## Frame kinds
//!
//! - **Work frames** (`Sequence`, `FinishResolution`) need no input. The
//!   chain driver pops and runs them.
//! - **Decision frames** (everything else) sit on top of the stack while a
//!   decision is pending and are consumed by exactly one resume call.

pub mod frames;
pub mod poll;

use serde::{Deserialize, Serialize};

pub use frames::{
    AuraFrame, BidFrame, ChoiceFrame, CreatureTypeFrame, DiscardFrame, DiscardOrLifeAnswer, DiscardOrLifeFrame,
    DiscardOrLifeStage, DivideFrame, FinishFrame, ManaFollowUp, ManaFrame, MayFrame, ModeFrame, OrderFrame,
    PutFromHandFrame, SacrificeFrame, SequenceFrame, TargetFollowUp, TargetFrame,
};
pub use poll::{Ask, PlayerPoll, PollStep};

/// A paused piece of work.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Continuation {
    // === Work ===
    Sequence(SequenceFrame),
    FinishResolution(FinishFrame),

    // === Choices ===
    May(MayFrame),
    ChooseMode(ModeFrame),
    ChooseColor(ChoiceFrame),
    ChooseNumber(ChoiceFrame),

    // === Targets and payment ===
    ChooseTargets(TargetFrame),
    PayMana(ManaFrame),

    // === Polls ===
    SecretBid(BidFrame),
    PutFromHand(PutFromHandFrame),
    CreatureTypePoll(CreatureTypeFrame),
    DiscardOrLifePoll(DiscardOrLifeFrame),
    Discard(DiscardFrame),
    Sacrifice(SacrificeFrame),

    // === Placement ===
    PlaceAura(AuraFrame),
    DivideDamage(DivideFrame),
    OrderObjects(OrderFrame),
}

impl Continuation {
    /// Whether the chain driver runs this frame without input.
    #[must_use]
    pub fn is_work(&self) -> bool {
        matches!(self, Continuation::Sequence(_) | Continuation::FinishResolution(_))
    }

    /// Short name for logs and errors.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Continuation::Sequence(_) => "sequence",
            Continuation::FinishResolution(_) => "finish resolution",
            Continuation::May(_) => "may",
            Continuation::ChooseMode(_) => "choose mode",
            Continuation::ChooseColor(_) => "choose color",
            Continuation::ChooseNumber(_) => "choose number",
            Continuation::ChooseTargets(_) => "choose targets",
            Continuation::PayMana(_) => "pay mana",
            Continuation::SecretBid(_) => "secret bid",
            Continuation::PutFromHand(_) => "put from hand",
            Continuation::CreatureTypePoll(_) => "creature type poll",
            Continuation::DiscardOrLifePoll(_) => "discard or life poll",
            Continuation::Discard(_) => "discard",
            Continuation::Sacrifice(_) => "sacrifice",
            Continuation::PlaceAura(_) => "place aura",
            Continuation::DivideDamage(_) => "divide damage",
            Continuation::OrderObjects(_) => "order objects",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::effects::EffectContext;

    #[test]
    fn test_work_frames() {
        let ctx = EffectContext::new(PlayerId::new(0));
        let seq = Continuation::Sequence(SequenceFrame { remaining: im::Vector::new(), ctx: ctx.clone() });
        let discard = Continuation::Discard(DiscardFrame { player: PlayerId::new(0), count: 1, ctx });
        assert!(seq.is_work());
        assert!(!discard.is_work());
        assert_eq!(discard.name(), "discard");
    }
}
