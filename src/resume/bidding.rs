//! Secret bids.
//!
//! Each player in turn secretly picks a number. Bids are revealed together
//! once everyone has answered, and every player tied for the highest bid
//! loses that much life.

use tracing::debug;

use crate::continuations::{Ask, BidFrame, Continuation, PlayerPoll, PollStep};
use crate::core::{GameState, PlayerId};
use crate::decisions::{DecisionKind, DecisionResponse};
use crate::effects::primitives;
use crate::effects::{EffectContext, PlayerSet};
use crate::engine::{EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};

use super::{ask, pause, poll_order, then_chain, ChainFn};

pub fn begin(state: GameState, players: &PlayerSet, cap: Option<u32>, ctx: EffectContext) -> EngineResult<Outcome> {
    let order = poll_order(&state, players, &ctx);
    let step = PlayerPoll::start(order, |player, _| ask_bid(&state, &ctx, player, cap));
    advance(state, step, cap, ctx)
}

pub fn resume(
    state: GameState,
    frame: BidFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let bid = response.into_number()?;
    let BidFrame { poll, cap, ctx } = frame;
    let step = poll.answer(bid, |player, _| ask_bid(&state, &ctx, player, cap));
    then_chain(advance(state, step, cap, ctx)?, chain)
}

/// Highest bid a player may make: the cap, or their life total.
fn bid_limit(state: &GameState, player: PlayerId, cap: Option<u32>) -> u32 {
    cap.unwrap_or_else(|| u32::try_from(state.life(player).max(0)).unwrap_or(u32::MAX))
}

fn ask_bid(state: &GameState, ctx: &EffectContext, player: PlayerId, cap: Option<u32>) -> Ask<u32> {
    let max = bid_limit(state, player, cap);
    if max == 0 {
        return Ask::Answer(0);
    }
    let kind = DecisionKind::Number { min: 0, max };
    Ask::Decide(ask(state, ctx, player, kind, format!("Secretly choose a number from 0 to {max}")))
}

fn advance(state: GameState, step: PollStep<u32>, cap: Option<u32>, ctx: EffectContext) -> EngineResult<Outcome> {
    match step {
        PollStep::Ask { poll, decision } => {
            pause(state, Continuation::SecretBid(BidFrame { poll, cap, ctx }), decision, EventLog::new())
        }
        PollStep::Done(bids) => Ok(reveal(state, &bids)),
    }
}

fn reveal(mut state: GameState, bids: &im::Vector<(PlayerId, u32)>) -> Outcome {
    let mut events: EventLog = bids.iter().map(|&(player, bid)| GameEvent::BidRevealed { player, bid }).collect();
    let highest = bids.iter().map(|(_, bid)| *bid).max().unwrap_or(0);
    debug!(highest, bidders = bids.len(), "bids revealed");
    if highest > 0 {
        for (player, _) in bids.iter().filter(|(_, bid)| *bid == highest) {
            primitives::lose_life(&mut state, *player, highest, &mut events);
        }
    }
    Outcome::completed(state, events)
}
