//! Floating (continuous) effect records.
//!
//! A floating effect is a recorded modification with a layer, the set of
//! entities it affects, a duration, and provenance. Records are data only;
//! the projector interprets them.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{CardType, Color, Keyword};
use crate::core::{EntityId, PlayerId};

/// Layer in which a modification applies, in application order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Layer {
    Control,
    Type,
    Color,
    Ability,
    PowerToughness,
}

/// What a floating effect changes.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Modification {
    /// Gain control of the affected objects.
    ChangeController(PlayerId),
    /// Add a card type ("becomes an artifact creature").
    AddCardType(CardType),
    /// Add subtypes.
    AddSubtypes(Vec<String>),
    /// The objects have every creature type.
    AllCreatureTypes,
    /// Add a color.
    AddColor(Color),
    /// Replace the object's colors.
    SetColors(Vec<Color>),
    /// Grant a keyword.
    AddKeyword(Keyword),
    /// Remove a keyword.
    RemoveKeyword(Keyword),
    /// Set base power/toughness.
    SetPowerToughness { power: i32, toughness: i32 },
    /// Adjust power/toughness.
    ModifyPowerToughness { power: i32, toughness: i32 },
}

impl Modification {
    /// The layer this modification belongs to.
    #[must_use]
    pub fn layer(&self) -> Layer {
        match self {
            Modification::ChangeController(_) => Layer::Control,
            Modification::AddCardType(_) | Modification::AddSubtypes(_) | Modification::AllCreatureTypes => {
                Layer::Type
            }
            Modification::AddColor(_) | Modification::SetColors(_) => Layer::Color,
            Modification::AddKeyword(_) | Modification::RemoveKeyword(_) => Layer::Ability,
            Modification::SetPowerToughness { .. } | Modification::ModifyPowerToughness { .. } => {
                Layer::PowerToughness
            }
        }
    }
}

/// How long a floating effect lasts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Duration {
    /// Until the host ends the turn (see `GameState::end_turn_cleanup`).
    EndOfTurn,
    /// For as long as the source stays on the battlefield.
    WhileSourceOnBattlefield,
    /// Forever.
    Permanent,
}

/// One recorded continuous effect.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FloatingEffect {
    /// Application layer, derived from the modification.
    pub layer: Layer,
    /// The change.
    pub modification: Modification,
    /// Entities affected, fixed when the effect was created.
    pub affected: Vector<EntityId>,
    /// Duration.
    pub duration: Duration,
    /// Object that created the effect.
    pub source: Option<EntityId>,
    /// Player who controlled the creating effect.
    pub controller: PlayerId,
    /// Creation order; ties within a layer apply oldest first.
    pub timestamp: u64,
}

impl FloatingEffect {
    /// Create a record. The timestamp is assigned by the snapshot.
    pub fn new(
        modification: Modification,
        affected: impl IntoIterator<Item = EntityId>,
        duration: Duration,
        controller: PlayerId,
    ) -> Self {
        Self {
            layer: modification.layer(),
            modification,
            affected: affected.into_iter().collect(),
            duration,
            source: None,
            controller,
            timestamp: 0,
        }
    }

    /// Record the creating object.
    #[must_use]
    pub fn with_source(mut self, source: EntityId) -> Self {
        self.source = Some(source);
        self
    }

    /// Whether the effect touches `entity`.
    #[must_use]
    pub fn affects(&self, entity: EntityId) -> bool {
        self.affected.contains(&entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_derived_from_modification() {
        let effect = FloatingEffect::new(
            Modification::ModifyPowerToughness { power: 1, toughness: 1 },
            [EntityId(5)],
            Duration::EndOfTurn,
            PlayerId::new(0),
        );
        assert_eq!(effect.layer, Layer::PowerToughness);
        assert!(effect.affects(EntityId(5)));
        assert!(!effect.affects(EntityId(6)));
    }

    #[test]
    fn test_layer_order() {
        assert!(Layer::Control < Layer::Type);
        assert!(Layer::Type < Layer::PowerToughness);
        assert_eq!(Modification::AllCreatureTypes.layer(), Layer::Type);
        assert_eq!(Modification::AddKeyword(Keyword::Flying).layer(), Layer::Ability);
    }
}
