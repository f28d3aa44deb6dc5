//! Resumers: one module per family of continuation frames.
//!
//! Every family exposes a `begin` function that builds its frame and
//! decision (or finishes immediately when no real choice exists), and a
//! `resume` function that consumes the frame together with the player's
//! answer.
//!
//! A resumer, once its own work is done, hands off to the chain driver it
//! was given instead of declaring completion itself. `begin` functions
//! never call the chain driver; whoever started the effect decides what
//! runs next.
//!
//! Entities named in a frame or a response are checked against the current
//! snapshot before use. Anything that went stale is skipped with an
//! `ActionSkipped` event rather than reported as an error.

pub mod aura;
pub mod bidding;
pub mod choice;
pub mod composite;
pub mod creature_types;
pub mod damage;
pub mod discard;
pub mod each_player;
pub mod mana;
pub mod ordering;
pub mod sacrifice;
pub mod targeting;

use tracing::{debug, trace};

use crate::continuations::Continuation;
use crate::core::{GameState, PlayerId, Target};
use crate::decisions::{Decision, DecisionKind, DecisionResponse};
use crate::effects::{EffectContext, PlayerSet};
use crate::engine::{Engine, EngineError, EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};

/// The chain driver handed to every resumer.
pub type ChainFn<'a> = &'a dyn Fn(GameState, EventLog) -> EngineResult<Outcome>;

/// Push `frame`, make `decision` pending and return the paused outcome.
pub fn pause(
    mut state: GameState,
    frame: Continuation,
    decision: Decision,
    mut events: EventLog,
) -> EngineResult<Outcome> {
    trace!(frame = frame.name(), depth = state.frame_depth(), "push frame");
    let decision = state.suspend(frame, decision)?;
    debug!(decision = %decision.id, player = %decision.player, kind = decision.kind.name(), "paused");
    events.push(GameEvent::DecisionRequested {
        decision: decision.id,
        player: decision.player,
        kind: decision.kind.name().to_string(),
    });
    Ok(Outcome::paused(state, decision, events))
}

/// Hand a completed outcome to the chain driver. Anything else passes through.
pub fn then_chain(outcome: Outcome, chain: ChainFn<'_>) -> EngineResult<Outcome> {
    match outcome {
        Outcome::Completed { state, events } => chain(state, events),
        other => Ok(other),
    }
}

/// Build a decision stamped with the effect's provenance.
pub(crate) fn ask(
    state: &GameState,
    ctx: &EffectContext,
    player: PlayerId,
    kind: DecisionKind,
    prompt: impl Into<String>,
) -> Decision {
    Decision::new(player, kind, prompt).from_context(ctx, state.phase())
}

/// Players to poll for `set`, in order, leaving out anyone who has lost.
///
/// `Each` starts from the active player; `Opponents` follows the
/// controller in turn order.
#[must_use]
pub fn poll_order(state: &GameState, set: &PlayerSet, ctx: &EffectContext) -> Vec<PlayerId> {
    let n = state.player_count();
    let players: Vec<PlayerId> = match set {
        PlayerSet::Each => PlayerId::turn_order_from(state.active_player(), n).collect(),
        PlayerSet::Opponents => ctx.controller.opponents(n).collect(),
        PlayerSet::You => vec![ctx.controller],
        PlayerSet::ChosenPlayers => ctx.legal_targets().filter_map(Target::as_player).collect(),
        PlayerSet::Fixed(players) => players.clone(),
    };
    players.into_iter().filter(|p| state.is_in_game(*p)).collect()
}

/// Route a popped decision frame to its family.
pub fn dispatch(
    engine: &Engine,
    state: GameState,
    frame: Continuation,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    match frame {
        Continuation::May(frame) => choice::resume_may(engine, state, frame, response, chain),
        Continuation::ChooseMode(frame) => choice::resume_mode(engine, state, frame, response, chain),
        Continuation::ChooseColor(frame) => choice::resume_color(engine, state, frame, response, chain),
        Continuation::ChooseNumber(frame) => choice::resume_number(engine, state, frame, response, chain),
        Continuation::ChooseTargets(frame) => targeting::resume(engine, state, frame, response, chain),
        Continuation::PayMana(frame) => mana::resume(engine, state, frame, response, chain),
        Continuation::SecretBid(frame) => bidding::resume(state, frame, response, chain),
        Continuation::PutFromHand(frame) => each_player::resume(state, frame, response, chain),
        Continuation::CreatureTypePoll(frame) => creature_types::resume(engine, state, frame, response, chain),
        Continuation::DiscardOrLifePoll(frame) => discard::resume_discard_or_life(state, frame, response, chain),
        Continuation::Discard(frame) => discard::resume_discard(state, frame, response, chain),
        Continuation::Sacrifice(frame) => sacrifice::resume(engine, state, frame, response, chain),
        Continuation::PlaceAura(frame) => aura::resume(engine, state, frame, response, chain),
        Continuation::DivideDamage(frame) => damage::resume(engine, state, frame, response, chain),
        Continuation::OrderObjects(frame) => ordering::resume(state, frame, response, chain),
        work @ (Continuation::Sequence(_) | Continuation::FinishResolution(_)) => {
            Err(EngineError::UnexpectedFrame { found: work.name(), context: "resuming a decision" })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EngineConfig, Target};

    #[test]
    fn test_poll_order() {
        let mut state = GameState::new(&EngineConfig::new(4));
        state.turn.active = PlayerId::new(2);
        let ctx = EffectContext::new(PlayerId::new(1));

        let each: Vec<_> = poll_order(&state, &PlayerSet::Each, &ctx).iter().map(|p| p.0).collect();
        assert_eq!(each, vec![2, 3, 0, 1]);

        let opponents: Vec<_> = poll_order(&state, &PlayerSet::Opponents, &ctx).iter().map(|p| p.0).collect();
        assert_eq!(opponents, vec![2, 3, 0]);

        let chosen = ctx.clone().with_targets([Target::Player(PlayerId::new(3))]);
        assert_eq!(poll_order(&state, &PlayerSet::ChosenPlayers, &chosen), vec![PlayerId::new(3)]);
    }

    #[test]
    fn test_poll_order_skips_lost_players() {
        let mut state = GameState::new(&EngineConfig::new(3));
        if let Some(p) = state.player_mut(PlayerId::new(1)) {
            p.lost = true;
        }
        let ctx = EffectContext::new(PlayerId::new(0));
        let each: Vec<_> = poll_order(&state, &PlayerSet::Each, &ctx).iter().map(|p| p.0).collect();
        assert_eq!(each, vec![0, 2]);
    }

    #[test]
    fn test_dispatch_rejects_work_frame() {
        let engine = Engine::new(EngineConfig::default());
        let state = engine.new_game();
        let frame = Continuation::Sequence(crate::continuations::SequenceFrame {
            remaining: im::Vector::new(),
            ctx: EffectContext::new(PlayerId::new(0)),
        });
        let chain = |s: GameState, e: EventLog| Ok(Outcome::completed(s, e));
        let result = dispatch(&engine, state, frame, DecisionResponse::YesNo(true), &chain);
        assert!(matches!(result, Err(EngineError::UnexpectedFrame { found: "sequence", .. })));
    }
}
