//! The game snapshot.
//!
//! ## GameState
//!
//! Everything the engine needs to continue a game, as plain data:
//! - Turn info (number, active player, phase)
//! - Player state (life, mana pool, loss flag, free-form values)
//! - Objects (component sets) and zones
//! - The stack, floating effects and the continuation stack
//! - The pending decision, if any
//! - An RNG checkpoint
//!
//! Uses `im` persistent collections, so cloning a snapshot is O(1) and the
//! engine can treat every input as "old snapshot in, new snapshot out".
//! Ordered maps keep iteration deterministic.
//!
//! ## Invariants
//!
//! - At most one decision is pending. `suspend` refuses to set a second.
//! - While a decision is pending, the topmost continuation frame is the
//!   decision frame it belongs to.

use im::{OrdMap, Vector};
use serde::{Deserialize, Serialize};

use super::config::{EngineConfig, Phase};
use super::entity::EntityId;
use super::player::{PlayerId, PlayerMap};
use super::rng::{GameRng, GameRngState};
use crate::cards::{CardData, Color, ComponentSet};
use crate::continuations::Continuation;
use crate::decisions::{Decision, DecisionId};
use crate::engine::{EngineError, EngineResult};
use crate::layers::{Duration, FloatingEffect};
use crate::stack::StackObject;
use crate::zones::{Location, Zone, ZoneManager, ZonePosition};

/// Per-player values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub life: i64,
    /// Floating mana by colour.
    pub mana_pool: OrdMap<Color, u32>,
    /// Set when the player has lost the game.
    pub lost: bool,
    /// Free-form values (poison, energy, ...).
    pub values: OrdMap<String, i64>,
}

impl PlayerState {
    /// A player with `life` and nothing else.
    #[must_use]
    pub fn new(life: i64) -> Self {
        Self { life, mana_pool: OrdMap::new(), lost: false, values: OrdMap::new() }
    }

    /// Total floating mana.
    #[must_use]
    pub fn mana_total(&self) -> u32 {
        self.mana_pool.values().fold(0u32, |acc, n| acc.saturating_add(*n))
    }

    /// Add mana to the pool.
    pub fn add_mana(&mut self, color: Color, amount: u32) {
        let current = self.mana_pool.get(&color).copied().unwrap_or(0);
        self.mana_pool.insert(color, current.saturating_add(amount));
    }

    /// Spend up to `amount` generic mana, colours in canonical order.
    ///
    /// Returns how much was spent.
    pub fn spend_mana(&mut self, amount: u32) -> u32 {
        let mut left = amount;
        for color in Color::ALL {
            if left == 0 {
                break;
            }
            let have = self.mana_pool.get(&color).copied().unwrap_or(0);
            let used = have.min(left);
            if used == 0 {
                continue;
            }
            if have == used {
                self.mana_pool.remove(&color);
            } else {
                self.mana_pool.insert(color, have - used);
            }
            left -= used;
        }
        amount - left
    }

    /// Get a free-form value with a default.
    #[must_use]
    pub fn get_value(&self, key: &str, default: i64) -> i64 {
        self.values.get(key).copied().unwrap_or(default)
    }
}

/// Turn progression, stamped by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInfo {
    /// Turn number (starts at 1).
    pub number: u32,
    pub active: PlayerId,
    pub phase: Phase,
}

/// Complete, serializable game snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    // === Configuration ===
    player_count: usize,

    // === Game Progression ===
    pub turn: TurnInfo,

    // === Players and objects ===
    players: PlayerMap<PlayerState>,
    objects: OrdMap<EntityId, ComponentSet>,
    zones: ZoneManager,

    // === Resolution ===
    stack: Vector<StackObject>,
    floating: Vector<FloatingEffect>,
    continuations: Vector<Continuation>,
    pending: Option<Decision>,

    // === Determinism ===
    rng: GameRngState,
    next_entity_id: u32,
    next_decision_id: u32,
    next_timestamp: u64,
}

impl GameState {
    /// Create a new game state from configuration.
    ///
    /// ## Defaults
    ///
    /// - turn 1, player 0 active, precombat main phase
    /// - every player at `starting_life`
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let player_count = config.player_count;
        Self {
            player_count,
            turn: TurnInfo { number: 1, active: PlayerId::new(0), phase: Phase::default() },
            players: PlayerMap::new(player_count, |_| PlayerState::new(config.starting_life)),
            objects: OrdMap::new(),
            zones: ZoneManager::new(player_count),
            stack: Vector::new(),
            floating: Vector::new(),
            continuations: Vector::new(),
            pending: None,
            rng: GameRngState::seeded(config.seed),
            next_entity_id: 1,
            next_decision_id: 1,
            next_timestamp: 1,
        }
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    // === Turn ===

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.turn.active
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.turn.phase
    }

    /// Clear end-of-turn effects, damage and mana pools.
    pub fn end_turn_cleanup(&mut self) {
        self.floating.retain(|e| e.duration != Duration::EndOfTurn);
        let ids: Vec<EntityId> = self.objects.keys().copied().collect();
        for id in ids {
            self.update_object(id, |c| c.damage = 0);
        }
        for player in PlayerId::all(self.player_count) {
            self.players[player].mana_pool = OrdMap::new();
        }
    }

    // === Players ===

    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerState> {
        self.players.get(player)
    }

    pub fn player_mut(&mut self, player: PlayerId) -> Option<&mut PlayerState> {
        self.players.get_mut(player)
    }

    /// Life total, or 0 for an unknown player.
    #[must_use]
    pub fn life(&self, player: PlayerId) -> i64 {
        self.player(player).map_or(0, |p| p.life)
    }

    /// Whether the player exists and has not lost.
    #[must_use]
    pub fn is_in_game(&self, player: PlayerId) -> bool {
        self.player(player).is_some_and(|p| !p.lost)
    }

    // === Objects ===

    /// Allocate a new entity ID.
    pub fn alloc_entity(&mut self) -> EntityId {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;
        id
    }

    /// Create a card owned by `owner` on top of one of their zones.
    pub fn create_card(&mut self, owner: PlayerId, card: CardData, zone: Zone) -> EntityId {
        let id = self.alloc_entity();
        self.objects.insert(id, ComponentSet::new(id, owner, card));
        self.zones.insert(id, Location::new(owner, zone), ZonePosition::Top);
        id
    }

    #[must_use]
    pub fn object(&self, id: EntityId) -> Option<&ComponentSet> {
        self.objects.get(&id)
    }

    /// Apply `f` to an object's components. Returns false if it is gone.
    pub fn update_object(&mut self, id: EntityId, f: impl FnOnce(&mut ComponentSet)) -> bool {
        match self.objects.get_mut(&id) {
            Some(components) => {
                f(components);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn zones(&self) -> &ZoneManager {
        &self.zones
    }

    #[must_use]
    pub fn location(&self, id: EntityId) -> Option<Location> {
        self.zones.location(id)
    }

    #[must_use]
    pub fn is_on_battlefield(&self, id: EntityId) -> bool {
        self.zones.is_in_zone(id, Zone::Battlefield)
    }

    /// Base controller of an object.
    #[must_use]
    pub fn controller_of(&self, id: EntityId) -> Option<PlayerId> {
        self.object(id).map(|c| c.controller)
    }

    /// Contents of one player's zone, bottom to top.
    #[must_use]
    pub fn cards_in(&self, player: PlayerId, zone: Zone) -> Vector<EntityId> {
        self.zones.cards(player, zone)
    }

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> Vector<EntityId> {
        self.cards_in(player, Zone::Hand)
    }

    /// Whether `card` is currently in `player`'s hand.
    #[must_use]
    pub fn in_hand_of(&self, player: PlayerId, card: EntityId) -> bool {
        self.location(card) == Some(Location::new(player, Zone::Hand))
    }

    /// Move an object to its owner's zone, on top.
    pub fn move_object(&mut self, id: EntityId, zone: Zone) -> Option<Location> {
        let owner = self.object(id)?.owner;
        self.move_object_to(id, Location::new(owner, zone), ZonePosition::Top)
    }

    /// Move an object to any location.
    ///
    /// Changing zones resets per-zone components. Entering the battlefield
    /// gives control to the player whose battlefield it enters.
    ///
    /// Returns the previous location, or `None` if the object is unknown.
    pub fn move_object_to(&mut self, id: EntityId, to: Location, position: ZonePosition) -> Option<Location> {
        let from = self.zones.move_to(id, to, position)?;
        if from.zone != to.zone {
            self.update_object(id, |c| {
                c.reset_for_zone_change();
                if to.zone == Zone::Battlefield {
                    c.controller = to.player;
                }
            });
        }
        Some(from)
    }

    // === Stack ===

    /// Stack objects, bottom to top.
    #[must_use]
    pub fn stack(&self) -> &Vector<StackObject> {
        &self.stack
    }

    pub fn push_stack(&mut self, object: StackObject) {
        self.stack.push_back(object);
    }

    pub fn pop_stack(&mut self) -> Option<StackObject> {
        self.stack.pop_back()
    }

    /// Remove a stack object wherever it is.
    pub fn remove_stack_object(&mut self, id: EntityId) -> Option<StackObject> {
        let index = self.stack.iter().position(|o| o.id == id)?;
        Some(self.stack.remove(index))
    }

    // === Floating effects ===

    #[must_use]
    pub fn floating(&self) -> &Vector<FloatingEffect> {
        &self.floating
    }

    /// Record a floating effect, stamping its timestamp.
    pub fn add_floating(&mut self, mut effect: FloatingEffect) -> u64 {
        let timestamp = self.next_timestamp;
        self.next_timestamp += 1;
        effect.timestamp = timestamp;
        self.floating.push_back(effect);
        timestamp
    }

    // === Continuations ===

    /// Continuation frames, bottom to top.
    #[must_use]
    pub fn continuations(&self) -> &Vector<Continuation> {
        &self.continuations
    }

    /// Current continuation stack depth.
    #[must_use]
    pub fn frame_depth(&self) -> usize {
        self.continuations.len()
    }

    pub fn push_frame(&mut self, frame: Continuation) {
        self.continuations.push_back(frame);
    }

    /// Insert a frame at `depth`, beneath any frames pushed since.
    pub fn insert_frame(&mut self, depth: usize, frame: Continuation) {
        let depth = depth.min(self.continuations.len());
        self.continuations.insert(depth, frame);
    }

    pub fn pop_frame(&mut self) -> Option<Continuation> {
        self.continuations.pop_back()
    }

    #[must_use]
    pub fn top_frame(&self) -> Option<&Continuation> {
        self.continuations.last()
    }

    // === Decisions ===

    #[must_use]
    pub fn pending(&self) -> Option<&Decision> {
        self.pending.as_ref()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Push a decision frame and mark its decision pending.
    ///
    /// Assigns the decision id. Fails if a decision is already pending.
    pub fn suspend(&mut self, frame: Continuation, mut decision: Decision) -> EngineResult<Decision> {
        if let Some(existing) = &self.pending {
            return Err(EngineError::DecisionAlreadyPending(existing.id));
        }
        decision.id = DecisionId(self.next_decision_id);
        self.next_decision_id += 1;
        self.continuations.push_back(frame);
        self.pending = Some(decision.clone());
        Ok(decision)
    }

    /// Clear and return the pending decision.
    pub fn take_pending(&mut self) -> Option<Decision> {
        self.pending.take()
    }

    // === RNG ===

    /// Run `f` with a generator restored from the checkpoint, then store
    /// the advanced checkpoint.
    pub fn with_rng<R>(&mut self, f: impl FnOnce(&mut GameRng) -> R) -> R {
        let mut rng = GameRng::from_state(&self.rng);
        let result = f(&mut rng);
        self.rng = rng.state();
        result
    }

    #[must_use]
    pub fn rng_state(&self) -> &GameRngState {
        &self.rng
    }

    // === Serialization ===

    /// Encode the snapshot with bincode.
    pub fn to_bytes(&self) -> EngineResult<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> EngineResult<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
