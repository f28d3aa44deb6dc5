//! Resolution context carried by every effect and continuation.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::Color;
use crate::core::{EntityId, PlayerId, Target};

use super::effect::{Amount, TargetRef};

/// Everything an effect knows about the ability it belongs to.
///
/// The context is plain data so it travels inside continuation frames:
/// choices made earlier in a resolution (targets, a colour, X) are recorded
/// here and read by later effects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectContext {
    /// Player controlling the effect.
    pub controller: PlayerId,
    /// Object the effect comes from.
    pub source: Option<EntityId>,
    /// Name of the source, kept for prompts even after the source leaves.
    pub source_name: Option<String>,
    /// Chosen targets, in choice order.
    pub targets: Vector<Target>,
    /// Indices into `targets` that were illegal when the effect resolved.
    /// They keep their slot so `Chosen(i)` still names the same target.
    #[serde(default)]
    pub illegal: Vector<usize>,
    pub chosen_color: Option<Color>,
    pub chosen_number: Option<u32>,
}

impl EffectContext {
    /// A context with no source and no choices.
    #[must_use]
    pub fn new(controller: PlayerId) -> Self {
        Self {
            controller,
            source: None,
            source_name: None,
            targets: Vector::new(),
            illegal: Vector::new(),
            chosen_color: None,
            chosen_number: None,
        }
    }

    /// Record the source object.
    #[must_use]
    pub fn with_source(mut self, source: EntityId, name: impl Into<String>) -> Self {
        self.source = Some(source);
        self.source_name = Some(name.into());
        self
    }

    /// Record chosen targets.
    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Target>) -> Self {
        self.targets = targets.into_iter().collect();
        self.illegal = Vector::new();
        self
    }

    /// Mark the target at `index` as illegal.
    #[must_use]
    pub fn with_illegal(mut self, index: usize) -> Self {
        if index < self.targets.len() && !self.illegal.contains(&index) {
            self.illegal.push_back(index);
        }
        self
    }

    /// Chosen targets that are still legal, in choice order.
    pub fn legal_targets(&self) -> impl Iterator<Item = Target> + '_ {
        self.targets
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.illegal.contains(i))
            .map(|(_, t)| *t)
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.chosen_color = Some(color);
        self
    }

    #[must_use]
    pub fn with_number(mut self, number: u32) -> Self {
        self.chosen_number = Some(number);
        self
    }

    /// Resolve an amount. An unchosen X counts as zero.
    #[must_use]
    pub fn amount(&self, amount: Amount) -> u32 {
        match amount {
            Amount::Fixed(n) => n,
            Amount::Chosen => self.chosen_number.unwrap_or(0),
        }
    }

    /// Resolve a reference into concrete targets.
    ///
    /// References to missing choices, or to targets marked illegal, resolve
    /// to nothing.
    #[must_use]
    pub fn resolve(&self, reference: TargetRef) -> Vec<Target> {
        match reference {
            TargetRef::You => vec![Target::Player(self.controller)],
            TargetRef::Source => self.source.map(Target::Object).into_iter().collect(),
            TargetRef::Chosen(i) if self.illegal.contains(&i) => Vec::new(),
            TargetRef::Chosen(i) => self.targets.get(i).copied().into_iter().collect(),
            TargetRef::AllChosen => self.legal_targets().collect(),
            TargetRef::Fixed(target) => vec![target],
        }
    }

    /// Resolve a reference, keeping only players.
    #[must_use]
    pub fn resolve_players(&self, reference: TargetRef) -> Vec<PlayerId> {
        self.resolve(reference).into_iter().filter_map(Target::as_player).collect()
    }

    /// Resolve a reference, keeping only objects.
    #[must_use]
    pub fn resolve_objects(&self, reference: TargetRef) -> Vec<EntityId> {
        self.resolve(reference).into_iter().filter_map(Target::as_object).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_references() {
        let ctx = EffectContext::new(PlayerId::new(0))
            .with_source(EntityId(7), "Shock")
            .with_targets([Target::Player(PlayerId::new(1)), Target::Object(EntityId(9))]);

        assert_eq!(ctx.resolve(TargetRef::You), vec![Target::Player(PlayerId::new(0))]);
        assert_eq!(ctx.resolve(TargetRef::Source), vec![Target::Object(EntityId(7))]);
        assert_eq!(ctx.resolve(TargetRef::Chosen(1)), vec![Target::Object(EntityId(9))]);
        assert!(ctx.resolve(TargetRef::Chosen(5)).is_empty());
        assert_eq!(ctx.resolve_players(TargetRef::AllChosen), vec![PlayerId::new(1)]);
        assert_eq!(ctx.resolve_objects(TargetRef::AllChosen), vec![EntityId(9)]);
    }

    #[test]
    fn test_illegal_targets_keep_indices() {
        let a = Target::Object(EntityId(1));
        let b = Target::Object(EntityId(2));
        let ctx = EffectContext::new(PlayerId::new(0)).with_targets([a, b]).with_illegal(0).with_illegal(9);

        assert!(ctx.resolve(TargetRef::Chosen(0)).is_empty());
        assert_eq!(ctx.resolve(TargetRef::Chosen(1)), vec![b]);
        assert_eq!(ctx.resolve(TargetRef::AllChosen), vec![b]);
        assert_eq!(ctx.illegal.len(), 1);
    }

    #[test]
    fn test_amount() {
        let ctx = EffectContext::new(PlayerId::new(0));
        assert_eq!(ctx.amount(Amount::Fixed(3)), 3);
        assert_eq!(ctx.amount(Amount::Chosen), 0);
        assert_eq!(ctx.with_number(4).amount(Amount::Chosen), 4);
    }
}
