//! "Each player may put a card from their hand onto the battlefield."
//!
//! Players are asked one at a time, in order. A player holding no matching
//! card is skipped without a decision. Chosen cards enter the battlefield
//! together after the last player answers.

use im::Vector;

use crate::continuations::{Ask, Continuation, PlayerPoll, PollStep, PutFromHandFrame};
use crate::core::{EntityId, GameState, PlayerId};
use crate::decisions::{DecisionKind, DecisionResponse};
use crate::effects::primitives;
use crate::effects::{CardFilter, EffectContext, PlayerSet};
use crate::engine::{EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};

use super::{ask, pause, poll_order, then_chain, ChainFn};

pub fn begin(state: GameState, players: &PlayerSet, filter: CardFilter, ctx: EffectContext) -> EngineResult<Outcome> {
    let order = poll_order(&state, players, &ctx);
    let step = PlayerPoll::start(order, |player, _| ask_player(&state, &ctx, &filter, player));
    advance(state, step, filter, ctx)
}

pub fn resume(
    state: GameState,
    frame: PutFromHandFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let chosen = response.into_cards()?.first().copied();
    let PutFromHandFrame { poll, filter, ctx } = frame;
    let step = poll.answer(chosen, |player, _| ask_player(&state, &ctx, &filter, player));
    then_chain(advance(state, step, filter, ctx)?, chain)
}

fn candidates(state: &GameState, filter: &CardFilter, player: PlayerId) -> Vec<EntityId> {
    state
        .hand(player)
        .into_iter()
        .filter(|id| {
            state
                .object(*id)
                .and_then(|c| c.card.as_ref())
                .is_some_and(|card| card.is_permanent() && filter.matches(card))
        })
        .collect()
}

fn ask_player(state: &GameState, ctx: &EffectContext, filter: &CardFilter, player: PlayerId) -> Ask<Option<EntityId>> {
    let candidates = candidates(state, filter, player);
    if candidates.is_empty() {
        return Ask::Skip;
    }
    let kind = DecisionKind::SelectCards { candidates, min: 0, max: 1 };
    Ask::Decide(ask(state, ctx, player, kind, "You may put a card from your hand onto the battlefield"))
}

fn advance(
    state: GameState,
    step: PollStep<Option<EntityId>>,
    filter: CardFilter,
    ctx: EffectContext,
) -> EngineResult<Outcome> {
    match step {
        PollStep::Ask { poll, decision } => pause(
            state,
            Continuation::PutFromHand(PutFromHandFrame { poll, filter, ctx }),
            decision,
            EventLog::new(),
        ),
        PollStep::Done(answers) => Ok(put_all(state, &filter, &answers)),
    }
}

fn put_all(mut state: GameState, filter: &CardFilter, answers: &Vector<(PlayerId, Option<EntityId>)>) -> Outcome {
    let mut events = EventLog::new();
    for &(player, card) in answers {
        let Some(card) = card else { continue };
        if candidates(&state, filter, player).contains(&card) {
            primitives::put_onto_battlefield(&mut state, card, player, &mut events);
        } else {
            events.push(GameEvent::skipped(format!("{card} is no longer in {player}'s hand")));
        }
    }
    Outcome::completed(state, events)
}
