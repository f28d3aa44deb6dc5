//! Objects on the stack.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, PlayerId};
use crate::effects::{Effect, EffectContext, TargetRequirement};

/// What kind of stack object this is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackObjectKind {
    /// A spell. The object id is the card's entity, which sits in its
    /// owner's stack zone while the spell is on the stack.
    Spell,
    /// A triggered or activated ability. Its id exists only on the stack.
    Ability,
}

/// A spell or ability waiting to resolve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StackObject {
    pub id: EntityId,
    pub controller: PlayerId,
    pub kind: StackObjectKind,
    /// What happens on resolution.
    pub effect: Effect,
    /// Source and chosen targets.
    pub context: EffectContext,
    /// Targeting restriction, re-checked on resolution.
    pub requirement: Option<TargetRequirement>,
}

impl StackObject {
    /// Whether this is a spell.
    #[must_use]
    pub fn is_spell(&self) -> bool {
        self.kind == StackObjectKind::Spell
    }
}

/// A triggered ability the host wants put on the stack.
///
/// Trigger detection belongs to the host; the engine only announces the
/// ability: choose targets if it has any, pay the optional cost if it has
/// one, then push it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TriggeredAbility {
    pub controller: PlayerId,
    pub source: Option<EntityId>,
    pub source_name: String,
    pub effect: Effect,
    pub requirement: Option<TargetRequirement>,
    /// Generic mana the controller may pay; unpaid, the ability is removed.
    pub cost: Option<u32>,
}

impl TriggeredAbility {
    /// A trigger with no targets and no cost.
    pub fn new(controller: PlayerId, source_name: impl Into<String>, effect: Effect) -> Self {
        Self {
            controller,
            source: None,
            source_name: source_name.into(),
            effect,
            requirement: None,
            cost: None,
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    #[must_use]
    pub fn with_targets(mut self, requirement: TargetRequirement) -> Self {
        self.requirement = Some(requirement);
        self
    }

    #[must_use]
    pub fn with_cost(mut self, amount: u32) -> Self {
        self.cost = Some(amount);
        self
    }
}
