//! Effect definitions.
//!
//! Effects are the data describing what an ability does. Leaf effects
//! change the snapshot directly; composite effects sequence other effects;
//! decision effects stop and ask a player something, leaving a
//! continuation frame that holds everything needed to finish later.

use serde::{Deserialize, Serialize};

use crate::cards::{CounterKind, Color};
use crate::core::{PlayerId, Target};
use crate::layers::{Duration, Modification};

use super::targeting::{CardFilter, TargetRequirement};

/// A number that is either printed or chosen during resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Amount {
    /// A fixed amount.
    Fixed(u32),
    /// The number chosen earlier in this resolution (X).
    Chosen,
}

impl From<u32> for Amount {
    fn from(n: u32) -> Self {
        Amount::Fixed(n)
    }
}

/// Who or what a leaf effect applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRef {
    /// The controller of the effect.
    You,
    /// The source object of the effect.
    Source,
    /// The i-th chosen target.
    Chosen(usize),
    /// Every chosen target.
    AllChosen,
    /// A fixed player or object.
    Fixed(Target),
}

/// A set of players polled one at a time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerSet {
    /// Every player in the game, starting with the active player.
    Each,
    /// The controller's opponents, in turn order after the controller.
    Opponents,
    /// The controller only.
    You,
    /// The target players chosen for this effect, in the order chosen.
    ChosenPlayers,
    /// A fixed list, in the listed order.
    Fixed(Vec<PlayerId>),
}

/// Which colour a mana effect produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManaColor {
    Fixed(Color),
    /// The colour chosen earlier in this resolution.
    Chosen,
}

/// One entry of a modal effect.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mode {
    pub label: String,
    pub effect: Effect,
}

impl Mode {
    pub fn new(label: impl Into<String>, effect: Effect) -> Self {
        Self { label: label.into(), effect }
    }
}

/// What happens once every player has named a creature type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureTypeOutcome {
    /// Destroy every creature that is none of the named types.
    DestroyAllExceptChosen,
    /// Each player returns creature cards of the type they named from
    /// their graveyard to the battlefield.
    ReturnChosenFromGraveyard,
}

/// Where cards go after a look-and-order effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LibraryEnd {
    Top,
    Bottom,
}

/// An effect.
///
/// ## Leaf effects
///
/// Apply immediately and never pause: damage, life, draw, destroy, zone
/// moves, counters, mana, continuous modifications.
///
/// ## Composite effects
///
/// - `Sequence`: run sub-effects in order. If one pauses, the rest wait in
///   a `Sequence` work frame beneath the paused decision.
/// - `WithTargets`: choose targets, then run the inner effect with them.
///
/// ## Decision effects
///
/// Stop and ask a player. Each maps to one continuation family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    // === Life and damage ===

    /// Deal damage to each referenced player or object.
    DealDamage { amount: Amount, to: TargetRef },

    /// Referenced players lose life.
    LoseLife { amount: Amount, who: TargetRef },

    /// Referenced players gain life.
    GainLife { amount: Amount, who: TargetRef },

    // === Cards ===

    /// Referenced players draw cards.
    DrawCards { count: Amount, who: TargetRef },

    /// Referenced players put the top cards of their library into their
    /// graveyard.
    Mill { count: u32, who: TargetRef },

    /// Referenced players discard cards chosen by the snapshot RNG.
    DiscardAtRandom { count: u32, who: TargetRef },

    /// Destroy referenced permanents.
    Destroy { what: TargetRef },

    /// Exile referenced objects.
    Exile { what: TargetRef },

    /// Return referenced permanents to their owner's hand.
    ReturnToHand { what: TargetRef },

    /// Tap referenced permanents.
    Tap { what: TargetRef },

    /// Untap referenced permanents.
    Untap { what: TargetRef },

    /// Put counters on referenced permanents.
    AddCounters { what: TargetRef, kind: CounterKind, count: u32 },

    /// Counter referenced spells.
    CounterSpell { what: TargetRef },

    // === Mana and state ===

    /// Add mana to the referenced players' pools.
    AddMana { who: TargetRef, color: ManaColor, amount: u32 },

    /// Create a continuous effect over referenced objects.
    ApplyContinuous { modification: Modification, to: TargetRef, duration: Duration },

    /// Adjust a free-form player value.
    ModifyPlayerValue { who: TargetRef, key: String, delta: i64 },

    // === Composite ===

    /// Run sub-effects in order.
    Sequence(Vec<Effect>),

    /// Choose targets, then run `effect` with them.
    WithTargets { requirement: TargetRequirement, effect: Box<Effect> },

    // === Decisions ===

    /// "You may ...": yes runs `effect`, no runs `otherwise` if any.
    May { prompt: String, effect: Box<Effect>, otherwise: Option<Box<Effect>> },

    /// Choose one of several modes.
    ChooseMode { modes: Vec<Mode> },

    /// Choose a colour, then run `effect` with it.
    ChooseColor { effect: Box<Effect> },

    /// Choose X in `0..=max`, then run `effect` with it.
    ChooseNumber { max: u32, effect: Box<Effect> },

    /// A player may pay generic mana. Pool mana is spent first, then the
    /// player picks untapped mana sources for the rest.
    PayOrElse {
        payer: TargetRef,
        amount: u32,
        paid: Option<Box<Effect>>,
        unpaid: Option<Box<Effect>>,
    },

    /// Divide damage among the chosen targets.
    DivideDamage { amount: Amount },

    /// Each player secretly bids life; the highest bidders lose that much.
    /// Without a cap, a player may bid up to their life total.
    SecretBid { players: PlayerSet, cap: Option<u32> },

    /// Each player may put a matching card from their hand onto the
    /// battlefield.
    EachPlayerMayPutFromHand { players: PlayerSet, filter: CardFilter },

    /// Each player names a creature type.
    EachPlayerChoosesCreatureType { players: PlayerSet, outcome: CreatureTypeOutcome },

    /// Each player discards a card unless they pay `life`.
    DiscardOrLoseLife { players: PlayerSet, life: u32 },

    /// Referenced player discards `count` cards of their choice.
    Discard { who: TargetRef, count: u32 },

    /// Each player sacrifices a matching permanent.
    Sacrifice { players: PlayerSet, filter: CardFilter },

    /// Return every aura card from the referenced player's graveyard to
    /// the battlefield, each attached to a permanent they choose.
    ReturnAurasFromGraveyard { who: TargetRef },

    /// Look at the top `count` cards of a library and put them back on the
    /// top or bottom in any order.
    LookAndOrder { who: TargetRef, count: u32, to: LibraryEnd },
}

impl Effect {
    // === Builders ===

    /// Deal a fixed amount of damage.
    pub fn damage(amount: u32, to: TargetRef) -> Self {
        Self::DealDamage { amount: Amount::Fixed(amount), to }
    }

    /// Lose a fixed amount of life.
    pub fn lose_life(amount: u32, who: TargetRef) -> Self {
        Self::LoseLife { amount: Amount::Fixed(amount), who }
    }

    /// Gain a fixed amount of life.
    pub fn gain_life(amount: u32, who: TargetRef) -> Self {
        Self::GainLife { amount: Amount::Fixed(amount), who }
    }

    /// Draw a fixed number of cards.
    pub fn draw(count: u32, who: TargetRef) -> Self {
        Self::DrawCards { count: Amount::Fixed(count), who }
    }

    /// "You may <effect>."
    pub fn may(prompt: impl Into<String>, effect: Effect) -> Self {
        Self::May { prompt: prompt.into(), effect: Box::new(effect), otherwise: None }
    }

    /// "Choose targets, then <effect>."
    pub fn with_targets(requirement: TargetRequirement, effect: Effect) -> Self {
        Self::WithTargets { requirement, effect: Box::new(effect) }
    }

    /// Whether this effect can stop for a decision.
    ///
    /// Leaf effects never pause; composite effects pause if any part does.
    #[must_use]
    pub fn can_pause(&self) -> bool {
        match self {
            Effect::Sequence(effects) => effects.iter().any(Effect::can_pause),
            Effect::DealDamage { .. }
            | Effect::LoseLife { .. }
            | Effect::GainLife { .. }
            | Effect::DrawCards { .. }
            | Effect::Mill { .. }
            | Effect::DiscardAtRandom { .. }
            | Effect::Destroy { .. }
            | Effect::Exile { .. }
            | Effect::ReturnToHand { .. }
            | Effect::Tap { .. }
            | Effect::Untap { .. }
            | Effect::AddCounters { .. }
            | Effect::CounterSpell { .. }
            | Effect::AddMana { .. }
            | Effect::ApplyContinuous { .. }
            | Effect::ModifyPlayerValue { .. } => false,
            _ => true,
        }
    }
}
