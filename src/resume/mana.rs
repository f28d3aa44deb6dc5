//! Mana payments.
//!
//! Floating mana in the payer's pool is spent first. Only the remainder is
//! asked for as a choice of untapped mana sources, one mana per source.
//! A payment that cannot be made, that the payer declines, or whose chosen
//! sources went stale, takes the unpaid branch and spends nothing.

use tracing::debug;

use crate::continuations::{Continuation, ManaFollowUp, ManaFrame};
use crate::core::{EntityId, GameState, PlayerId};
use crate::decisions::{DecisionKind, DecisionResponse};
use crate::effects::primitives;
use crate::effects::EffectContext;
use crate::engine::{Engine, EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};
use crate::stack;
use crate::zones::Zone;

use super::{ask, pause, then_chain, ChainFn};

/// Start a payment of `amount` generic mana by `payer`.
pub fn begin(
    engine: &Engine,
    state: GameState,
    payer: PlayerId,
    amount: u32,
    follow_up: ManaFollowUp,
) -> EngineResult<Outcome> {
    if !state.is_in_game(payer) {
        return settle(engine, state, follow_up, false, vec![GameEvent::skipped(format!("{payer} cannot pay"))]);
    }

    let pool = state.player(payer).map_or(0, |p| p.mana_total());
    let from_pool = pool.min(amount);
    let from_sources = amount - from_pool;

    if from_sources == 0 {
        let mut state = state;
        let events = pay(&mut state, payer, from_pool, &[]);
        return settle(engine, state, follow_up, true, events);
    }

    let sources = available_sources(&state, payer);
    if sources.len() < from_sources as usize {
        debug!(player = %payer, amount, available = sources.len(), "cannot pay");
        let events = vec![GameEvent::skipped(format!("{payer} cannot pay {amount} mana"))];
        return settle(engine, state, follow_up, false, events);
    }

    let kind = DecisionKind::ManaSources { sources, amount: from_sources };
    let decision = ask(&state, context(&follow_up), payer, kind, format!("Pay {amount} mana?"));
    pause(
        state,
        Continuation::PayMana(ManaFrame { payer, from_pool, from_sources, follow_up }),
        decision,
        EventLog::new(),
    )
}

pub fn resume(
    engine: &Engine,
    mut state: GameState,
    frame: ManaFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let chosen = response.into_mana_sources()?;
    let ManaFrame { payer, from_pool, from_sources, follow_up } = frame;

    if chosen.len() < from_sources as usize {
        let events = vec![GameEvent::PaymentDeclined { player: payer }];
        return then_chain(settle(engine, state, follow_up, false, events)?, chain);
    }

    let available = available_sources(&state, payer);
    let pool = state.player(payer).map_or(0, |p| p.mana_total());
    let stale = chosen.iter().find(|id| !available.contains(id));
    if let Some(id) = stale {
        let events = vec![GameEvent::skipped(format!("{id} can no longer produce mana"))];
        return then_chain(settle(engine, state, follow_up, false, events)?, chain);
    }
    if pool < from_pool {
        let events = vec![GameEvent::skipped(format!("{payer}'s mana pool no longer covers the cost"))];
        return then_chain(settle(engine, state, follow_up, false, events)?, chain);
    }

    let events = pay(&mut state, payer, from_pool, &chosen);
    then_chain(settle(engine, state, follow_up, true, events)?, chain)
}

/// Untapped mana sources `player` controls, in battlefield order.
fn available_sources(state: &GameState, player: PlayerId) -> Vec<EntityId> {
    state
        .cards_in(player, Zone::Battlefield)
        .into_iter()
        .filter(|id| {
            state.object(*id).is_some_and(|c| {
                c.controller == player && !c.tapped && c.card.as_ref().is_some_and(|card| card.is_mana_source())
            })
        })
        .collect()
}

fn pay(state: &mut GameState, payer: PlayerId, from_pool: u32, sources: &[EntityId]) -> EventLog {
    let mut events = EventLog::new();
    for id in sources {
        primitives::set_tapped(state, *id, true, &mut events);
    }
    let spent = state.player_mut(payer).map_or(0, |p| p.spend_mana(from_pool));
    let amount = spent + sources.len() as u32;
    events.push(GameEvent::ManaPaid { player: payer, amount, sources: sources.to_vec() });
    events
}

fn context(follow_up: &ManaFollowUp) -> &EffectContext {
    match follow_up {
        ManaFollowUp::Branches { ctx, .. } => ctx,
        ManaFollowUp::PutOnStack { object } => &object.context,
    }
}

fn settle(
    engine: &Engine,
    state: GameState,
    follow_up: ManaFollowUp,
    paid: bool,
    events: EventLog,
) -> EngineResult<Outcome> {
    let outcome = match follow_up {
        ManaFollowUp::Branches { paid: on_paid, unpaid, ctx } => {
            let branch = if paid { on_paid } else { unpaid };
            match branch {
                Some(effect) => engine.execute(state, &effect, &ctx)?,
                None => Outcome::completed(state, EventLog::new()),
            }
        }
        ManaFollowUp::PutOnStack { object } if paid => stack::push(state, object),
        ManaFollowUp::PutOnStack { object } => stack::abandon(state, object, "cost was not paid"),
    };
    Ok(outcome.after(events))
}
