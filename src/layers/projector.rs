//! Projection of battlefield objects through the layer system.
//!
//! The projector computes each permanent's current characteristics by
//! starting from printed card data and applying floating effects in layer
//! order (timestamp order within a layer). Counters apply last, after
//! every power/toughness modification.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::floating::{Duration, FloatingEffect, Modification};
use crate::cards::{CardType, Color, CounterKind, Keyword};
use crate::core::{EntityId, GameState, PlayerId};

/// Computed characteristics of one battlefield object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectedObject {
    pub id: EntityId,
    pub controller: PlayerId,
    pub card_types: SmallVec<[CardType; 2]>,
    pub subtypes: Vec<String>,
    /// Set by "is every creature type" effects.
    pub all_creature_types: bool,
    pub colors: SmallVec<[Color; 2]>,
    pub keywords: SmallVec<[Keyword; 2]>,
    pub power: Option<i32>,
    pub toughness: Option<i32>,
}

impl ProjectedObject {
    /// Check for a current card type.
    #[must_use]
    pub fn is(&self, card_type: CardType) -> bool {
        self.card_types.contains(&card_type)
    }

    /// Whether the object currently has the named creature type.
    #[must_use]
    pub fn has_creature_type(&self, name: &str) -> bool {
        self.is(CardType::Creature)
            && (self.all_creature_types || self.subtypes.iter().any(|s| s.eq_ignore_ascii_case(name)))
    }

    /// Check for a current keyword.
    #[must_use]
    pub fn has_keyword(&self, keyword: Keyword) -> bool {
        self.keywords.contains(&keyword)
    }
}

/// Computed view of the battlefield.
#[derive(Clone, Debug, Default)]
pub struct ProjectedView {
    objects: FxHashMap<EntityId, ProjectedObject>,
}

impl ProjectedView {
    /// Projected characteristics of a battlefield object.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&ProjectedObject> {
        self.objects.get(&id)
    }

    /// Number of projected objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether nothing is on the battlefield.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over projected objects in a stable (id) order.
    pub fn iter_sorted(&self) -> impl Iterator<Item = &ProjectedObject> {
        let mut objects: Vec<_> = self.objects.values().collect();
        objects.sort_by_key(|o| o.id);
        objects.into_iter()
    }
}

/// Computes current characteristics of battlefield objects.
pub trait Projector: Send + Sync {
    /// Project every object on the battlefield.
    fn project(&self, state: &GameState) -> ProjectedView;
}

/// Default projector applying floating effects in layer order.
#[derive(Clone, Copy, Debug, Default)]
pub struct LayerProjector;

impl LayerProjector {
    fn is_active(effect: &FloatingEffect, state: &GameState) -> bool {
        match effect.duration {
            Duration::WhileSourceOnBattlefield => {
                effect.source.is_some_and(|source| state.is_on_battlefield(source))
            }
            Duration::EndOfTurn | Duration::Permanent => true,
        }
    }

    fn apply(object: &mut ProjectedObject, modification: &Modification) {
        match modification {
            Modification::ChangeController(player) => object.controller = *player,
            Modification::AddCardType(card_type) => {
                if !object.card_types.contains(card_type) {
                    object.card_types.push(*card_type);
                }
            }
            Modification::AddSubtypes(subtypes) => {
                for subtype in subtypes {
                    if !object.subtypes.contains(subtype) {
                        object.subtypes.push(subtype.clone());
                    }
                }
            }
            Modification::AllCreatureTypes => object.all_creature_types = true,
            Modification::AddColor(color) => {
                if !object.colors.contains(color) {
                    object.colors.push(*color);
                }
            }
            Modification::SetColors(colors) => object.colors = colors.iter().copied().collect(),
            Modification::AddKeyword(keyword) => {
                if !object.keywords.contains(keyword) {
                    object.keywords.push(*keyword);
                }
            }
            Modification::RemoveKeyword(keyword) => object.keywords.retain(|k| k != keyword),
            Modification::SetPowerToughness { power, toughness } => {
                object.power = Some(*power);
                object.toughness = Some(*toughness);
            }
            Modification::ModifyPowerToughness { power, toughness } => {
                if let (Some(p), Some(t)) = (object.power.as_mut(), object.toughness.as_mut()) {
                    *p += power;
                    *t += toughness;
                }
            }
        }
    }
}

impl Projector for LayerProjector {
    fn project(&self, state: &GameState) -> ProjectedView {
        let mut objects = FxHashMap::default();

        for id in state.zones().cards_in_all(crate::zones::Zone::Battlefield) {
            let Some(components) = state.object(id) else {
                continue;
            };
            let projected = match &components.card {
                Some(card) => ProjectedObject {
                    id,
                    controller: components.controller,
                    card_types: card.card_types.clone(),
                    subtypes: card.subtypes.clone(),
                    all_creature_types: false,
                    colors: card.colors.clone(),
                    keywords: card.keywords.clone(),
                    power: card.power,
                    toughness: card.toughness,
                },
                None => ProjectedObject {
                    id,
                    controller: components.controller,
                    card_types: SmallVec::new(),
                    subtypes: Vec::new(),
                    all_creature_types: false,
                    colors: SmallVec::new(),
                    keywords: SmallVec::new(),
                    power: None,
                    toughness: None,
                },
            };
            objects.insert(id, projected);
        }

        let mut active: Vec<&FloatingEffect> =
            state.floating().iter().filter(|e| Self::is_active(e, state)).collect();
        active.sort_by_key(|e| (e.layer, e.timestamp));

        for effect in active {
            for entity in &effect.affected {
                if let Some(object) = objects.get_mut(entity) {
                    Self::apply(object, &effect.modification);
                }
            }
        }

        // Counters after every power/toughness effect.
        for object in objects.values_mut() {
            let Some(components) = state.object(object.id) else {
                continue;
            };
            let delta = components.counter(&CounterKind::PlusOne) as i32
                - components.counter(&CounterKind::MinusOne) as i32;
            if delta != 0 {
                if let (Some(p), Some(t)) = (object.power.as_mut(), object.toughness.as_mut()) {
                    *p += delta;
                    *t += delta;
                }
            }
        }

        ProjectedView { objects }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardData;
    use crate::core::EngineConfig;
    use crate::zones::Zone;

    fn setup() -> (GameState, EntityId) {
        let mut state = GameState::new(&EngineConfig::default());
        let bear = state.create_card(
            PlayerId::new(0),
            CardData::creature("Bear", 2, 2).with_subtype("Bear"),
            Zone::Battlefield,
        );
        (state, bear)
    }

    #[test]
    fn test_printed_characteristics() {
        let (state, bear) = setup();
        let view = LayerProjector.project(&state);
        let obj = view.get(bear).unwrap();
        assert_eq!(obj.power, Some(2));
        assert!(obj.has_creature_type("bear"));
        assert!(!obj.has_creature_type("Elf"));
    }

    #[test]
    fn test_layer_order_set_then_modify() {
        let (mut state, bear) = setup();
        // Modify first by timestamp, but set applies in the same layer earlier.
        state.add_floating(FloatingEffect::new(
            Modification::ModifyPowerToughness { power: 1, toughness: 1 },
            [bear],
            Duration::EndOfTurn,
            PlayerId::new(0),
        ));
        state.add_floating(FloatingEffect::new(
            Modification::SetPowerToughness { power: 5, toughness: 5 },
            [bear],
            Duration::EndOfTurn,
            PlayerId::new(0),
        ));
        let view = LayerProjector.project(&state);
        // Timestamp order within a layer: +1/+1 then set to 5/5.
        assert_eq!(view.get(bear).unwrap().power, Some(5));
    }

    #[test]
    fn test_counters_apply_last() {
        let (mut state, bear) = setup();
        state.update_object(bear, |c| c.add_counters(CounterKind::PlusOne, 2));
        state.add_floating(FloatingEffect::new(
            Modification::SetPowerToughness { power: 1, toughness: 1 },
            [bear],
            Duration::Permanent,
            PlayerId::new(0),
        ));
        let view = LayerProjector.project(&state);
        assert_eq!(view.get(bear).unwrap().power, Some(3));
        assert_eq!(view.get(bear).unwrap().toughness, Some(3));
    }

    #[test]
    fn test_source_bound_effect_ends_with_source() {
        let (mut state, bear) = setup();
        let anthem = state.create_card(
            PlayerId::new(0),
            CardData::new("Banner", CardType::Enchantment),
            Zone::Battlefield,
        );
        state.add_floating(
            FloatingEffect::new(
                Modification::AllCreatureTypes,
                [bear],
                Duration::WhileSourceOnBattlefield,
                PlayerId::new(0),
            )
            .with_source(anthem),
        );
        assert!(LayerProjector.project(&state).get(bear).unwrap().has_creature_type("Dragon"));

        state.move_object(anthem, Zone::Graveyard);
        assert!(!LayerProjector.project(&state).get(bear).unwrap().has_creature_type("Dragon"));
    }

    #[test]
    fn test_control_change() {
        let (mut state, bear) = setup();
        state.add_floating(FloatingEffect::new(
            Modification::ChangeController(PlayerId::new(1)),
            [bear],
            Duration::Permanent,
            PlayerId::new(1),
        ));
        assert_eq!(LayerProjector.project(&state).get(bear).unwrap().controller, PlayerId::new(1));
    }
}
