//! Component sets - the runtime facts about one entity.
//!
//! A `ComponentSet` is the open, typed bag of facts the snapshot stores
//! per entity: who owns and controls it, its printed card data, tapped
//! status, counters, marked damage, what it is attached to, plus a
//! free-form integer bag for game-specific bookkeeping.
//!
//! ## State Values (i64 only)
//!
//! `values` uses `OrdMap<String, i64>` so the bag stays persistent and
//! iterates deterministically. To store non-integer values:
//! - Booleans: use 0/1
//! - Entity references: use EntityId.0 as i64
//! - Enums: use discriminant values

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::attributes::{CardType, CounterKind};
use super::definition::CardData;
use crate::core::entity::EntityId;
use crate::core::player::PlayerId;

/// Runtime facts about one entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentSet {
    /// Identity.
    pub id: EntityId,

    /// Owner (who started the game with this card).
    pub owner: PlayerId,

    /// Controller (who currently controls it).
    pub controller: PlayerId,

    /// Printed card data. `None` for bare game objects with no card face.
    pub card: Option<CardData>,

    /// Tapped status.
    pub tapped: bool,

    /// Damage marked this turn.
    pub damage: u32,

    /// Counters by kind.
    pub counters: OrdMap<CounterKind, u32>,

    /// Object this one is attached to (Auras).
    pub attached_to: Option<EntityId>,

    /// Free-form integer facts.
    pub values: OrdMap<String, i64>,
}

impl ComponentSet {
    /// Create a component set for a card owned and controlled by `owner`.
    #[must_use]
    pub fn new(id: EntityId, owner: PlayerId, card: CardData) -> Self {
        Self {
            id,
            owner,
            controller: owner,
            card: Some(card),
            tapped: false,
            damage: 0,
            counters: OrdMap::new(),
            attached_to: None,
            values: OrdMap::new(),
        }
    }

    /// Card name, or a placeholder for faceless objects.
    #[must_use]
    pub fn name(&self) -> &str {
        self.card.as_ref().map_or("object", |c| c.name.as_str())
    }

    /// Check for a printed card type.
    #[must_use]
    pub fn is(&self, card_type: CardType) -> bool {
        self.card.as_ref().is_some_and(|c| c.is(card_type))
    }

    /// Number of counters of a kind.
    #[must_use]
    pub fn counter(&self, kind: &CounterKind) -> u32 {
        self.counters.get(kind).copied().unwrap_or(0)
    }

    /// Add counters of a kind.
    pub fn add_counters(&mut self, kind: CounterKind, count: u32) {
        let current = self.counter(&kind);
        self.counters.insert(kind, current + count);
    }

    /// Get a free-form value with a default.
    #[must_use]
    pub fn get_value(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    /// Set a free-form value.
    pub fn set_value(&mut self, key: impl Into<String>, value: i64) {
        self.values.insert(key.into(), value);
    }

    /// Clear per-zone facts when the object changes zones.
    ///
    /// An object that moves zones becomes a new object: it untaps, loses
    /// damage, counters and attachments, and reverts to its owner's control.
    pub fn reset_for_zone_change(&mut self) {
        self.tapped = false;
        self.damage = 0;
        self.counters = OrdMap::new();
        self.attached_to = None;
        self.controller = self.owner;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bear() -> ComponentSet {
        ComponentSet::new(EntityId(10), PlayerId::new(0), CardData::creature("Bear", 2, 2))
    }

    #[test]
    fn test_new_defaults() {
        let c = bear();
        assert_eq!(c.controller, PlayerId::new(0));
        assert!(!c.tapped);
        assert_eq!(c.damage, 0);
        assert!(c.is(CardType::Creature));
        assert_eq!(c.name(), "Bear");
    }

    #[test]
    fn test_counters_accumulate() {
        let mut c = bear();
        c.add_counters(CounterKind::PlusOne, 2);
        c.add_counters(CounterKind::PlusOne, 1);
        assert_eq!(c.counter(&CounterKind::PlusOne), 3);
        assert_eq!(c.counter(&CounterKind::MinusOne), 0);
    }

    #[test]
    fn test_zone_change_reset() {
        let mut c = bear();
        c.tapped = true;
        c.damage = 1;
        c.controller = PlayerId::new(1);
        c.attached_to = Some(EntityId(3));
        c.add_counters(CounterKind::PlusOne, 1);
        c.set_value("monstrous", 1);

        c.reset_for_zone_change();

        assert!(!c.tapped);
        assert_eq!(c.damage, 0);
        assert_eq!(c.controller, PlayerId::new(0));
        assert_eq!(c.attached_to, None);
        assert!(c.counters.is_empty());
        // Free-form values are left to the game to manage.
        assert_eq!(c.get_value("monstrous", 0), 1);
    }
}
