//! Zone manager for card locations and movement.
//!
//! The `ZoneManager` maps each `(player, zone)` pair to an ordered sequence
//! of entity ids and keeps a reverse index from entity to location. Both
//! sides are `im` persistent collections, so cloning the manager as part of
//! a snapshot is O(1) and every move is copy-on-write.
//!
//! Ordering convention: index 0 is the bottom of a zone, the last index is
//! the top (top of library = last element).

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use crate::core::entity::EntityId;
use crate::core::player::{PlayerId, PlayerMap};

/// A game zone. Each player has one of each.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Zone {
    Library,
    Hand,
    Battlefield,
    Graveyard,
    Exile,
    /// Cards that are spells on the stack.
    Stack,
    Command,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Zone::Library => "library",
            Zone::Hand => "hand",
            Zone::Battlefield => "battlefield",
            Zone::Graveyard => "graveyard",
            Zone::Exile => "exile",
            Zone::Stack => "stack",
            Zone::Command => "command",
        };
        f.write_str(name)
    }
}

/// Where an entity currently is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Player whose zone holds the entity.
    pub player: PlayerId,
    /// The zone.
    pub zone: Zone,
}

impl Location {
    /// Create a location.
    #[must_use]
    pub const fn new(player: PlayerId, zone: Zone) -> Self {
        Self { player, zone }
    }
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Add to top of zone (e.g., top of library).
    Top,
    /// Add to bottom of zone.
    Bottom,
    /// Insert at specific index (0 = bottom).
    Index(usize),
}

/// Manages entity locations across every player's zones.
///
/// ```
/// use ccg_rules::zones::{Location, Zone, ZoneManager, ZonePosition};
/// use ccg_rules::core::{EntityId, PlayerId};
///
/// let p0 = PlayerId::new(0);
/// let mut zones = ZoneManager::new(2);
/// zones.insert(EntityId(10), Location::new(p0, Zone::Library), ZonePosition::Top);
/// zones.insert(EntityId(11), Location::new(p0, Zone::Library), ZonePosition::Top);
///
/// assert_eq!(zones.top(p0, Zone::Library), Some(EntityId(11)));
/// zones.move_to(EntityId(11), Location::new(p0, Zone::Hand), ZonePosition::Top);
/// assert_eq!(zones.cards(p0, Zone::Hand).len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneManager {
    /// Entity locations: entity_id -> (player, zone)
    locations: OrdMap<EntityId, Location>,

    /// Ordered contents per player and zone.
    contents: PlayerMap<OrdMap<Zone, Vector<EntityId>>>,
}

impl ZoneManager {
    /// Create an empty zone manager for `player_count` players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            locations: OrdMap::new(),
            contents: PlayerMap::new(player_count, |_| OrdMap::new()),
        }
    }

    /// Insert an entity that is not yet tracked.
    ///
    /// Returns false (and changes nothing) if the entity is already tracked
    /// or the location names a player outside the game.
    pub fn insert(&mut self, entity: EntityId, location: Location, position: ZonePosition) -> bool {
        if self.locations.contains_key(&entity) || !self.contents.contains(location.player) {
            return false;
        }
        self.locations.insert(entity, location);
        let order = self.contents[location.player].entry(location.zone).or_insert_with(Vector::new);
        place(order, entity, position);
        true
    }

    /// Move an entity to a new location.
    ///
    /// Returns the old location, or `None` if the entity wasn't tracked.
    /// Moving within the same zone re-positions the entity.
    pub fn move_to(&mut self, entity: EntityId, to: Location, position: ZonePosition) -> Option<Location> {
        if !self.contents.contains(to.player) {
            return None;
        }
        let from = self.remove(entity)?;
        self.locations.insert(entity, to);
        let order = self.contents[to.player].entry(to.zone).or_insert_with(Vector::new);
        place(order, entity, position);
        Some(from)
    }

    /// Stop tracking an entity entirely.
    ///
    /// Returns the location it was in, or `None` if not found.
    pub fn remove(&mut self, entity: EntityId) -> Option<Location> {
        let location = self.locations.remove(&entity)?;
        if let Some(order) = self.contents[location.player].get_mut(&location.zone) {
            order.retain(|&e| e != entity);
        }
        Some(location)
    }

    /// Get where an entity is.
    #[must_use]
    pub fn location(&self, entity: EntityId) -> Option<Location> {
        self.locations.get(&entity).copied()
    }

    /// Check if an entity is in a zone (of any player).
    #[must_use]
    pub fn is_in_zone(&self, entity: EntityId, zone: Zone) -> bool {
        self.location(entity).is_some_and(|l| l.zone == zone)
    }

    /// Check if an entity is tracked at all.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.locations.contains_key(&entity)
    }

    /// Contents of one player's zone, bottom to top.
    #[must_use]
    pub fn cards(&self, player: PlayerId, zone: Zone) -> Vector<EntityId> {
        self.contents
            .get(player)
            .and_then(|zones| zones.get(&zone))
            .cloned()
            .unwrap_or_default()
    }

    /// Contents of a zone across all players, in seating order.
    pub fn cards_in_all(&self, zone: Zone) -> impl Iterator<Item = EntityId> + '_ {
        self.contents
            .iter()
            .filter_map(move |(_, zones)| zones.get(&zone))
            .flat_map(|order| order.iter().copied())
    }

    /// Number of entities in one player's zone.
    #[must_use]
    pub fn zone_size(&self, player: PlayerId, zone: Zone) -> usize {
        self.contents
            .get(player)
            .and_then(|zones| zones.get(&zone))
            .map_or(0, Vector::len)
    }

    /// Top entity of one player's zone.
    #[must_use]
    pub fn top(&self, player: PlayerId, zone: Zone) -> Option<EntityId> {
        self.contents.get(player)?.get(&zone)?.last().copied()
    }

    /// The top `count` entities of a zone, topmost first.
    #[must_use]
    pub fn top_n(&self, player: PlayerId, zone: Zone, count: usize) -> Vec<EntityId> {
        self.cards(player, zone).iter().rev().take(count).copied().collect()
    }
}

fn place(order: &mut Vector<EntityId>, entity: EntityId, position: ZonePosition) {
    match position {
        ZonePosition::Top => order.push_back(entity),
        ZonePosition::Bottom => order.push_front(entity),
        ZonePosition::Index(i) => {
            let idx = i.min(order.len());
            order.insert(idx, entity);
        }
    }
}
