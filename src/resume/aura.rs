//! Returning auras from a graveyard.
//!
//! Every aura card in the player's graveyard returns to the battlefield,
//! one at a time, attached to a permanent the player picks. Auras with
//! nothing to enchant stay where they are.

use im::Vector;
use tracing::trace;

use crate::cards::CardType;
use crate::continuations::{AuraFrame, Continuation};
use crate::core::{EntityId, GameState, PlayerId, Target};
use crate::decisions::{DecisionKind, DecisionResponse};
use crate::effects::primitives;
use crate::effects::EffectContext;
use crate::engine::{Engine, EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};
use crate::zones::{Location, Zone};

use super::{ask, pause, then_chain, ChainFn};

pub fn begin(engine: &Engine, state: GameState, player: PlayerId, ctx: EffectContext) -> EngineResult<Outcome> {
    let auras: Vector<EntityId> = state
        .cards_in(player, Zone::Graveyard)
        .into_iter()
        .filter(|id| is_aura(&state, *id))
        .collect();
    place_next(engine, state, player, auras, ctx, EventLog::new())
}

pub fn resume(
    engine: &Engine,
    mut state: GameState,
    frame: AuraFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let chosen = response.into_targets()?.first().and_then(|t| t.as_object());
    let AuraFrame { player, current, remaining, ctx } = frame;

    let mut events = EventLog::new();
    let still_there = state.location(current) == Some(Location::new(player, Zone::Graveyard));
    match chosen {
        Some(host) if still_there && hosts(engine, &state).contains(&host) => {
            attach(&mut state, player, current, host, &mut events);
        }
        Some(_) if !still_there => events.push(GameEvent::skipped(format!("{current} left the graveyard"))),
        _ => events.push(GameEvent::skipped(format!("{current} has nothing to enchant"))),
    }
    then_chain(place_next(engine, state, player, remaining, ctx, events)?, chain)
}

fn is_aura(state: &GameState, id: EntityId) -> bool {
    state.object(id).and_then(|c| c.card.as_ref()).is_some_and(|card| card.is_aura())
}

/// Permanents an aura can be attached to.
fn hosts(engine: &Engine, state: &GameState) -> Vec<EntityId> {
    engine
        .projector()
        .project(state)
        .iter_sorted()
        .filter(|o| !(o.is(CardType::Enchantment) && o.subtypes.iter().any(|s| s == "Aura")))
        .map(|o| o.id)
        .collect()
}

fn attach(state: &mut GameState, player: PlayerId, aura: EntityId, host: EntityId, events: &mut EventLog) {
    if primitives::put_onto_battlefield(state, aura, player, events) {
        state.update_object(aura, |c| c.attached_to = Some(host));
        events.push(GameEvent::AuraAttached { aura, to: host });
    }
}

/// Place auras from `remaining` until one needs a choice.
fn place_next(
    engine: &Engine,
    mut state: GameState,
    player: PlayerId,
    mut remaining: Vector<EntityId>,
    ctx: EffectContext,
    mut events: EventLog,
) -> EngineResult<Outcome> {
    while let Some(aura) = remaining.pop_front() {
        if state.location(aura) != Some(Location::new(player, Zone::Graveyard)) {
            events.push(GameEvent::skipped(format!("{aura} left the graveyard")));
            continue;
        }
        let hosts = hosts(engine, &state);
        match hosts.as_slice() {
            [] => {
                trace!(%aura, "no host");
                events.push(GameEvent::skipped(format!("{aura} has nothing to enchant")));
            }
            [only] => attach(&mut state, player, aura, *only, &mut events),
            _ => {
                let candidates = hosts.into_iter().map(Target::Object).collect();
                let name = state.object(aura).map(|c| c.name().to_string()).unwrap_or_default();
                let kind = DecisionKind::ChooseTargets { candidates, min: 1, max: 1 };
                let decision = ask(&state, &ctx, player, kind, format!("Attach {name} to a permanent"));
                let frame = AuraFrame { player, current: aura, remaining, ctx };
                return pause(state, Continuation::PlaceAura(frame), decision, events);
            }
        }
    }
    Ok(Outcome::completed(state, events))
}
