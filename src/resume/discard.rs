//! Discards chosen by the discarding player.
//!
//! Two shapes live here:
//!
//! - **Discard N**: the player picks N cards from their hand. Cards that
//!   left the hand before the answer arrived do not count, and the player
//!   is asked again for the shortfall while cards remain.
//! - **Discard unless you pay life**: each player in turn is offered to pay
//!   life. A player who declines then picks the card to discard. All
//!   payments and discards happen together after the last player answers.

use im::Vector;

use crate::continuations::{
    Ask, Continuation, DiscardFrame, DiscardOrLifeAnswer, DiscardOrLifeFrame, DiscardOrLifeStage, PlayerPoll, PollStep,
};
use crate::core::{GameState, PlayerId};
use crate::decisions::{DecisionKind, DecisionResponse};
use crate::effects::primitives;
use crate::effects::{EffectContext, PlayerSet};
use crate::engine::{EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};

use super::{ask, pause, poll_order, then_chain, ChainFn};

// === Discard N ===

/// Ask `player` to discard `count` cards. `events` are carried into the
/// outcome.
pub fn begin_discard(
    mut state: GameState,
    player: PlayerId,
    count: u32,
    ctx: EffectContext,
    mut events: EventLog,
) -> EngineResult<Outcome> {
    let hand = state.hand(player);
    if count == 0 {
        return Ok(Outcome::completed(state, events));
    }
    if hand.is_empty() {
        events.push(GameEvent::skipped(format!("{player} has no cards to discard")));
        return Ok(Outcome::completed(state, events));
    }
    if hand.len() <= count as usize {
        for card in hand {
            primitives::discard(&mut state, player, card, &mut events);
        }
        return Ok(Outcome::completed(state, events));
    }

    let n = count as usize;
    let kind = DecisionKind::SelectCards { candidates: hand.into_iter().collect(), min: n, max: n };
    let prompt = if n == 1 { "Discard a card".to_string() } else { format!("Discard {n} cards") };
    let decision = ask(&state, &ctx, player, kind, prompt);
    pause(state, Continuation::Discard(DiscardFrame { player, count, ctx }), decision, events)
}

pub fn resume_discard(
    mut state: GameState,
    frame: DiscardFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let cards = response.into_cards()?;
    let DiscardFrame { player, count, ctx } = frame;

    let mut events = EventLog::new();
    let mut discarded = 0u32;
    for card in cards {
        if primitives::discard(&mut state, player, card, &mut events) {
            discarded += 1;
        }
    }

    let owed = count.saturating_sub(discarded);
    if owed > 0 && !state.hand(player).is_empty() {
        return then_chain(begin_discard(state, player, owed, ctx, events)?, chain);
    }
    chain(state, events)
}

// === Discard unless you pay life ===

pub fn begin_discard_or_life(
    state: GameState,
    players: &PlayerSet,
    life: u32,
    ctx: EffectContext,
) -> EngineResult<Outcome> {
    let order = poll_order(&state, players, &ctx);
    let step = PlayerPoll::start(order, |player, _| offer_life(&state, &ctx, player, life));
    advance(state, step, DiscardOrLifeStage::OfferLife, life, ctx)
}

pub fn resume_discard_or_life(
    state: GameState,
    frame: DiscardOrLifeFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let DiscardOrLifeFrame { poll, stage, life, ctx } = frame;
    let next = |player: PlayerId, _: &Vector<(PlayerId, DiscardOrLifeAnswer)>| offer_life(&state, &ctx, player, life);

    let (step, stage) = match stage {
        DiscardOrLifeStage::OfferLife => {
            let hand = state.hand(poll.current);
            if response.into_yes_no()? {
                (poll.answer(DiscardOrLifeAnswer::PayLife, next), DiscardOrLifeStage::OfferLife)
            } else if hand.len() <= 1 {
                let answer = hand.front().map_or(DiscardOrLifeAnswer::Nothing, |c| DiscardOrLifeAnswer::Discard(*c));
                (poll.answer(answer, next), DiscardOrLifeStage::OfferLife)
            } else {
                let kind = DecisionKind::SelectCards { candidates: hand.into_iter().collect(), min: 1, max: 1 };
                let decision = ask(&state, &ctx, poll.current, kind, "Discard a card");
                (poll.reask(decision), DiscardOrLifeStage::ChooseDiscard)
            }
        }
        DiscardOrLifeStage::ChooseDiscard => {
            let answer = match response.into_cards()?.first() {
                Some(card) => DiscardOrLifeAnswer::Discard(*card),
                None => DiscardOrLifeAnswer::Nothing,
            };
            (poll.answer(answer, next), DiscardOrLifeStage::OfferLife)
        }
    };
    then_chain(advance(state, step, stage, life, ctx)?, chain)
}

/// Offer `player` to pay life. A player with an empty hand loses nothing
/// by declining, so they are not asked.
fn offer_life(state: &GameState, ctx: &EffectContext, player: PlayerId, life: u32) -> Ask<DiscardOrLifeAnswer> {
    if state.hand(player).is_empty() {
        return Ask::Answer(DiscardOrLifeAnswer::Nothing);
    }
    let prompt = format!("Pay {life} life? If you don't, discard a card");
    Ask::Decide(ask(state, ctx, player, DecisionKind::YesNo, prompt))
}

fn advance(
    state: GameState,
    step: PollStep<DiscardOrLifeAnswer>,
    stage: DiscardOrLifeStage,
    life: u32,
    ctx: EffectContext,
) -> EngineResult<Outcome> {
    match step {
        PollStep::Ask { poll, decision } => pause(
            state,
            Continuation::DiscardOrLifePoll(DiscardOrLifeFrame { poll, stage, life, ctx }),
            decision,
            EventLog::new(),
        ),
        PollStep::Done(answers) => Ok(settle(state, &answers, life)),
    }
}

fn settle(mut state: GameState, answers: &Vector<(PlayerId, DiscardOrLifeAnswer)>, life: u32) -> Outcome {
    let mut events = EventLog::new();
    for &(player, answer) in answers {
        match answer {
            DiscardOrLifeAnswer::PayLife => primitives::lose_life(&mut state, player, life, &mut events),
            DiscardOrLifeAnswer::Discard(card) => {
                primitives::discard(&mut state, player, card, &mut events);
            }
            DiscardOrLifeAnswer::Nothing => {}
        }
    }
    Outcome::completed(state, events)
}
