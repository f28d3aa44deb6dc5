//! Host inputs that start new work.
//!
//! An `Action` is something the host asks the engine to do when no
//! decision is pending: resolve an effect directly, announce a spell or a
//! triggered ability, or resolve the top of the stack. Answers to pending
//! decisions go through `Engine::resume` instead.
//!
//! ```
//! use ccg_rules::core::{Action, PlayerId};
//! use ccg_rules::effects::{Effect, EffectContext, TargetRef};
//!
//! let action = Action::resolve(Effect::draw(1, TargetRef::You), EffectContext::new(PlayerId::new(0)));
//! assert_eq!(action.name(), "resolve");
//! ```

use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::player::PlayerId;
use crate::effects::{Effect, EffectContext, TargetRequirement};
use crate::stack::TriggeredAbility;

/// A host input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Resolve an effect immediately, outside the stack.
    Resolve { effect: Effect, context: EffectContext },

    /// Cast a spell from `controller`'s hand: move it to the stack, choose
    /// targets if it has any, then push it.
    CastSpell {
        controller: PlayerId,
        card: EntityId,
        effect: Effect,
        requirement: Option<TargetRequirement>,
    },

    /// Announce a triggered ability.
    PutTriggerOnStack(TriggeredAbility),

    /// Resolve the topmost stack object.
    ResolveTopOfStack,
}

impl Action {
    /// Resolve `effect` with `context`.
    pub fn resolve(effect: Effect, context: EffectContext) -> Self {
        Self::Resolve { effect, context }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Action::Resolve { .. } => "resolve",
            Action::CastSpell { .. } => "cast spell",
            Action::PutTriggerOnStack(_) => "put trigger on stack",
            Action::ResolveTopOfStack => "resolve top of stack",
        }
    }
}
