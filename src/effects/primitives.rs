//! State-changing primitives shared by leaf effects and resumers.
//!
//! Every primitive re-checks its references against the snapshot it is
//! given and quietly does nothing (recording an `ActionSkipped` event) when
//! an object has gone. Nothing here can fail.

use tracing::trace;

use crate::cards::{CardType, Color, CounterKind, Keyword};
use crate::core::{EntityId, GameState, PlayerId, Target};
use crate::events::{EventLog, GameEvent};
use crate::layers::Projector;
use crate::zones::{Location, Zone, ZonePosition};

// === Players ===

/// Mark players at or below zero life as having lost.
pub fn check_player_loss(state: &mut GameState, player: PlayerId, events: &mut EventLog) {
    if let Some(p) = state.player_mut(player) {
        if !p.lost && p.life <= 0 {
            p.lost = true;
            events.push(GameEvent::PlayerLost { player });
        }
    }
}

pub fn lose_life(state: &mut GameState, player: PlayerId, amount: u32, events: &mut EventLog) {
    if amount == 0 || !state.is_in_game(player) {
        return;
    }
    if let Some(p) = state.player_mut(player) {
        p.life -= i64::from(amount);
        events.push(GameEvent::LifeLost { player, amount });
    }
    check_player_loss(state, player, events);
}

pub fn gain_life(state: &mut GameState, player: PlayerId, amount: u32, events: &mut EventLog) {
    if amount == 0 || !state.is_in_game(player) {
        return;
    }
    if let Some(p) = state.player_mut(player) {
        p.life += i64::from(amount);
        events.push(GameEvent::LifeGained { player, amount });
    }
}

pub fn add_mana(state: &mut GameState, player: PlayerId, color: Color, amount: u32, events: &mut EventLog) {
    if let Some(p) = state.player_mut(player) {
        p.add_mana(color, amount);
        events.push(GameEvent::ManaAdded { player, color, amount });
    }
}

// === Damage ===

/// Whether `target` can currently be dealt damage.
#[must_use]
pub fn is_damageable(state: &GameState, projector: &dyn Projector, target: Target) -> bool {
    match target {
        Target::Player(player) => state.is_in_game(player),
        Target::Object(id) => projector
            .project(state)
            .get(id)
            .is_some_and(|o| o.is(CardType::Creature) || o.is(CardType::Planeswalker)),
    }
}

/// Deal damage. Creatures with lethal damage are destroyed.
pub fn deal_damage(
    state: &mut GameState,
    projector: &dyn Projector,
    source: Option<EntityId>,
    target: Target,
    amount: u32,
    events: &mut EventLog,
) {
    if amount == 0 {
        return;
    }
    if !is_damageable(state, projector, target) {
        events.push(GameEvent::skipped(format!("{target} can no longer be dealt damage")));
        return;
    }
    match target {
        Target::Player(player) => {
            if let Some(p) = state.player_mut(player) {
                p.life -= i64::from(amount);
            }
            events.push(GameEvent::DamageDealt { source, target, amount });
            check_player_loss(state, player, events);
        }
        Target::Object(id) => {
            state.update_object(id, |c| c.damage += amount);
            events.push(GameEvent::DamageDealt { source, target, amount });
            let view = projector.project(state);
            let lethal = view.get(id).zip(state.object(id)).is_some_and(|(o, c)| {
                o.is(CardType::Creature) && o.toughness.is_some_and(|t| i64::from(c.damage) >= i64::from(t))
            });
            if lethal {
                destroy(state, projector, id, events);
            }
        }
    }
}

// === Zone changes ===

/// Move an object and record the zone change. Returns false if it is gone.
pub fn move_object(
    state: &mut GameState,
    id: EntityId,
    to: Location,
    position: ZonePosition,
    events: &mut EventLog,
) -> bool {
    match state.move_object_to(id, to, position) {
        Some(from) => {
            trace!(entity = %id, from = %from.zone, to = %to.zone, "zone change");
            events.push(GameEvent::ZoneChanged { entity: id, from, to });
            true
        }
        None => false,
    }
}

/// Move an object to its owner's zone.
pub fn move_to_owner_zone(state: &mut GameState, id: EntityId, zone: Zone, events: &mut EventLog) -> bool {
    let Some(owner) = state.object(id).map(|c| c.owner) else {
        return false;
    };
    move_object(state, id, Location::new(owner, zone), ZonePosition::Top, events)
}

/// Put a card onto the battlefield under `controller`'s control.
pub fn put_onto_battlefield(state: &mut GameState, id: EntityId, controller: PlayerId, events: &mut EventLog) -> bool {
    move_object(state, id, Location::new(controller, Zone::Battlefield), ZonePosition::Top, events)
}

/// Destroy a permanent unless it is indestructible.
pub fn destroy(state: &mut GameState, projector: &dyn Projector, id: EntityId, events: &mut EventLog) -> bool {
    if !state.is_on_battlefield(id) {
        events.push(GameEvent::skipped(format!("{id} is no longer on the battlefield")));
        return false;
    }
    let indestructible = projector
        .project(state)
        .get(id)
        .is_some_and(|o| o.has_keyword(Keyword::Indestructible));
    if indestructible {
        events.push(GameEvent::skipped(format!("{id} is indestructible")));
        return false;
    }
    if move_to_owner_zone(state, id, Zone::Graveyard, events) {
        events.push(GameEvent::Destroyed { entity: id });
        true
    } else {
        false
    }
}

/// Sacrifice a permanent `player` controls.
pub fn sacrifice(state: &mut GameState, player: PlayerId, id: EntityId, events: &mut EventLog) -> bool {
    if !state.is_on_battlefield(id) {
        events.push(GameEvent::skipped(format!("{id} is no longer on the battlefield")));
        return false;
    }
    if move_to_owner_zone(state, id, Zone::Graveyard, events) {
        events.push(GameEvent::Sacrificed { player, entity: id });
        true
    } else {
        false
    }
}

/// Discard a card from `player`'s hand.
pub fn discard(state: &mut GameState, player: PlayerId, card: EntityId, events: &mut EventLog) -> bool {
    if !state.in_hand_of(player, card) {
        events.push(GameEvent::skipped(format!("{card} is no longer in {player}'s hand")));
        return false;
    }
    if move_to_owner_zone(state, card, Zone::Graveyard, events) {
        events.push(GameEvent::Discarded { player, card });
        true
    } else {
        false
    }
}

/// Discard `count` cards chosen by the snapshot RNG.
pub fn discard_at_random(state: &mut GameState, player: PlayerId, count: u32, events: &mut EventLog) {
    for _ in 0..count {
        let hand = state.hand(player);
        let Some(index) = state.with_rng(|rng| rng.choose_index(hand.len())) else {
            break;
        };
        discard(state, player, hand[index], events);
    }
}

/// Draw cards. Drawing from an empty library draws nothing.
pub fn draw(state: &mut GameState, player: PlayerId, count: u32, events: &mut EventLog) {
    for _ in 0..count {
        let Some(card) = state.zones().top(player, Zone::Library) else {
            events.push(GameEvent::skipped(format!("{player}'s library is empty")));
            break;
        };
        if move_object(state, card, Location::new(player, Zone::Hand), ZonePosition::Top, events) {
            events.push(GameEvent::CardDrawn { player, card });
        }
    }
}

/// Put the top cards of a library into the graveyard.
pub fn mill(state: &mut GameState, player: PlayerId, count: u32, events: &mut EventLog) {
    for card in state.zones().top_n(player, Zone::Library, count as usize) {
        move_to_owner_zone(state, card, Zone::Graveyard, events);
    }
}

// === Permanents ===

pub fn set_tapped(state: &mut GameState, id: EntityId, tapped: bool, events: &mut EventLog) {
    if !state.is_on_battlefield(id) {
        return;
    }
    let changed = state.object(id).is_some_and(|c| c.tapped != tapped);
    if changed {
        state.update_object(id, |c| c.tapped = tapped);
        events.push(if tapped { GameEvent::Tapped { entity: id } } else { GameEvent::Untapped { entity: id } });
    }
}

pub fn add_counters(state: &mut GameState, id: EntityId, kind: CounterKind, count: u32, events: &mut EventLog) {
    if count == 0 || !state.is_on_battlefield(id) {
        return;
    }
    state.update_object(id, |c| c.add_counters(kind, count));
    events.push(GameEvent::CountersAdded { entity: id, kind, count });
}

// === Stack ===

/// Counter a stack object. A countered spell goes to its owner's graveyard.
pub fn counter(state: &mut GameState, id: EntityId, events: &mut EventLog) -> bool {
    let Some(object) = state.remove_stack_object(id) else {
        events.push(GameEvent::skipped(format!("{id} is no longer on the stack")));
        return false;
    };
    if object.is_spell() {
        move_to_owner_zone(state, id, Zone::Graveyard, events);
    }
    events.push(GameEvent::SpellCountered { id });
    true
}
