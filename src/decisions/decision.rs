//! The question a paused engine asks.
//!
//! A `Decision` names the player who must answer, the shape of acceptable
//! answers, and where the question came from. It carries no executable
//! state; everything needed to continue lives in the continuation frame.

use serde::{Deserialize, Serialize};

use crate::cards::Color;
use crate::core::{EntityId, Phase, PlayerId, Target};
use crate::effects::EffectContext;

/// Identifies one decision within a game. Assigned when suspending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DecisionId(pub u32);

impl std::fmt::Display for DecisionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Decision({})", self.0)
    }
}

/// Where a decision came from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    pub source: Option<EntityId>,
    pub source_name: Option<String>,
    pub phase: Phase,
}

/// Shape of the answer a decision accepts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecisionKind {
    /// Yes or no.
    YesNo,
    /// A number in `min..=max`.
    Number { min: u32, max: u32 },
    /// Between `min` and `max` distinct cards from `candidates`.
    SelectCards { candidates: Vec<EntityId>, min: usize, max: usize },
    /// Between `min` and `max` distinct targets from `candidates`.
    ChooseTargets { candidates: Vec<Target>, min: usize, max: usize },
    /// A permutation of `objects`; the first listed ends up on top.
    Order { objects: Vec<EntityId> },
    /// Split `total` among distinct `targets`, at least `min_per_target`
    /// to each one named.
    Distribute { total: u32, targets: Vec<Target>, min_per_target: u32 },
    /// Pick up to `amount` distinct mana sources from `sources`.
    /// Picking fewer declines to pay.
    ManaSources { sources: Vec<EntityId>, amount: u32 },
    /// One colour from `allowed`.
    Color { allowed: Vec<Color> },
    /// One option index.
    ChooseOption { options: Vec<String> },
}

impl DecisionKind {
    /// Short name used in errors and events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            DecisionKind::YesNo => "yes/no",
            DecisionKind::Number { .. } => "number",
            DecisionKind::SelectCards { .. } => "cards",
            DecisionKind::ChooseTargets { .. } => "targets",
            DecisionKind::Order { .. } => "order",
            DecisionKind::Distribute { .. } => "distribution",
            DecisionKind::ManaSources { .. } => "mana sources",
            DecisionKind::Color { .. } => "color",
            DecisionKind::ChooseOption { .. } => "option",
        }
    }
}

/// A question for one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub id: DecisionId,
    pub player: PlayerId,
    pub kind: DecisionKind,
    pub prompt: String,
    pub provenance: Provenance,
}

impl Decision {
    /// Build a decision. The id is assigned by `GameState::suspend`.
    pub fn new(player: PlayerId, kind: DecisionKind, prompt: impl Into<String>) -> Self {
        Self {
            id: DecisionId::default(),
            player,
            kind,
            prompt: prompt.into(),
            provenance: Provenance::default(),
        }
    }

    /// Stamp provenance from the resolving effect.
    #[must_use]
    pub fn from_context(mut self, ctx: &EffectContext, phase: Phase) -> Self {
        self.provenance = Provenance {
            source: ctx.source,
            source_name: ctx.source_name.clone(),
            phase,
        };
        self
    }

    /// Prompt prefixed with the source name, for display.
    #[must_use]
    pub fn display_prompt(&self) -> String {
        match &self.provenance.source_name {
            Some(name) => format!("{name}: {}", self.prompt),
            None => self.prompt.clone(),
        }
    }
}
