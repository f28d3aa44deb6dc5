//! Target selection.
//!
//! Targets are chosen from the finder's candidates. On resume they are
//! checked again and only the ones still legal are kept; if that leaves
//! fewer than the requirement's minimum, the follow-up is abandoned.

use tracing::debug;

use crate::continuations::{Continuation, TargetFollowUp, TargetFrame};
use crate::core::{GameState, Target};
use crate::decisions::{DecisionKind, DecisionResponse};
use crate::effects::{EffectContext, TargetRequirement};
use crate::engine::{Engine, EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};
use crate::stack;

use super::{ask, pause, then_chain, ChainFn};

/// Ask the controller for targets, or abandon if there are too few.
pub fn begin(
    engine: &Engine,
    state: GameState,
    requirement: TargetRequirement,
    follow_up: TargetFollowUp,
    ctx: EffectContext,
) -> EngineResult<Outcome> {
    let candidates = engine.finder().find_legal_targets(&state, &requirement, ctx.controller, ctx.source);
    let (min, max) = requirement.count.bounds();

    if candidates.len() < min {
        return abandon(state, follow_up, "no legal targets", EventLog::new());
    }
    if candidates.is_empty() {
        return follow(engine, state, follow_up, ctx.with_targets(Vec::new()), EventLog::new());
    }

    let kind = DecisionKind::ChooseTargets { max: max.min(candidates.len()), min, candidates };
    let prompt = if min == max && min == 1 { "Choose a target".to_string() } else { format!("Choose up to {max} targets") };
    let decision = ask(&state, &ctx, ctx.controller, kind, prompt);
    pause(
        state,
        Continuation::ChooseTargets(TargetFrame { requirement, follow_up, ctx }),
        decision,
        EventLog::new(),
    )
}

pub fn resume(
    engine: &Engine,
    state: GameState,
    frame: TargetFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let chosen = response.into_targets()?;
    let TargetFrame { requirement, follow_up, ctx } = frame;

    let mut events = EventLog::new();
    let mut legal: Vec<Target> = Vec::with_capacity(chosen.len());
    for target in chosen {
        if engine.finder().is_legal(&state, &requirement, ctx.controller, ctx.source, target) {
            legal.push(target);
        } else {
            debug!(%target, "target no longer legal");
            events.push(GameEvent::skipped(format!("{target} is no longer a legal target")));
        }
    }

    let (min, _) = requirement.count.bounds();
    if legal.len() < min {
        return then_chain(abandon(state, follow_up, "chosen targets are no longer legal", events)?, chain);
    }

    events.push(GameEvent::TargetsChosen { player: ctx.controller, targets: legal.clone() });
    let outcome = follow(engine, state, follow_up, ctx.with_targets(legal), events)?;
    then_chain(outcome, chain)
}

fn follow(
    engine: &Engine,
    state: GameState,
    follow_up: TargetFollowUp,
    ctx: EffectContext,
    events: EventLog,
) -> EngineResult<Outcome> {
    let outcome = match follow_up {
        TargetFollowUp::Execute(effect) => engine.execute(state, &effect, &ctx)?,
        TargetFollowUp::PutOnStack { mut object, cost } => {
            object.context = ctx;
            stack::finish_announcement(engine, state, object, cost)?
        }
    };
    Ok(outcome.after(events))
}

fn abandon(state: GameState, follow_up: TargetFollowUp, reason: &str, mut events: EventLog) -> EngineResult<Outcome> {
    let outcome = match follow_up {
        TargetFollowUp::Execute(_) => {
            events.push(GameEvent::skipped(reason));
            Outcome::completed(state, EventLog::new())
        }
        TargetFollowUp::PutOnStack { object, .. } => stack::abandon(state, object, reason),
    };
    Ok(outcome.after(events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardData;
    use crate::core::{Action, EngineConfig, PlayerId};
    use crate::effects::{Effect, TargetCount, TargetRef};
    use crate::zones::Zone;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn engine() -> Engine {
        Engine::new(EngineConfig::default())
    }

    #[test]
    fn test_candidates_offered() {
        let engine = engine();
        let state = engine.new_game();
        let effect = Effect::with_targets(TargetRequirement::player(), Effect::damage(2, TargetRef::Chosen(0)));
        let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));

        let Some(DecisionKind::ChooseTargets { candidates, min, max }) = paused.decision().map(|d| d.kind.clone())
        else {
            panic!("expected a target decision");
        };
        assert_eq!(candidates, vec![Target::Player(P0), Target::Player(P1)]);
        assert_eq!((min, max), (1, 1));

        let done = engine.resume(paused.state(), DecisionResponse::Targets(vec![Target::Player(P1)]));
        assert_eq!(done.state().life(P1), 18);
    }

    #[test]
    fn test_no_candidates_skips() {
        let engine = engine();
        let state = engine.new_game();
        let effect = Effect::with_targets(TargetRequirement::creature(), Effect::Destroy { what: TargetRef::Chosen(0) });
        let out = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        assert!(out.is_completed());
        assert!(matches!(out.events(), [GameEvent::ActionSkipped { .. }]));
    }

    #[test]
    fn test_stale_target_is_dropped() {
        let engine = Engine::new(EngineConfig::new(2));
        let mut state = engine.new_game();
        let a = state.create_card(P1, CardData::creature("Elf", 1, 1), Zone::Battlefield);
        let b = state.create_card(P1, CardData::creature("Goblin", 1, 1), Zone::Battlefield);
        let requirement = TargetRequirement::creature().with_count(TargetCount::UpTo(2));
        let effect = Effect::with_targets(requirement, Effect::Tap { what: TargetRef::AllChosen });

        let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        let mut stale = paused.into_state();
        let mut scratch = EventLog::new();
        crate::effects::primitives::move_to_owner_zone(&mut stale, a, Zone::Graveyard, &mut scratch);

        let done = engine.resume(&stale, DecisionResponse::Targets(vec![Target::Object(a), Target::Object(b)]));
        assert!(done.is_completed());
        assert!(done.state().object(b).is_some_and(|c| c.tapped));
        assert!(done.events().iter().any(|e| matches!(e, GameEvent::ActionSkipped { .. })));
    }
}
