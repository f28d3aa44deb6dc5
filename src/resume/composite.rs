//! Sequences of effects.
//!
//! A sequence runs its effects in order. When one pauses, the rest of the
//! sequence is saved in a `Sequence` work frame inserted beneath whatever
//! frames the paused effect pushed, so the chain driver picks it up once
//! the paused effect is finished.

use im::Vector;
use tracing::trace;

use crate::continuations::{Continuation, SequenceFrame};
use crate::core::GameState;
use crate::effects::{Effect, EffectContext};
use crate::engine::{Engine, EngineResult, Outcome};
use crate::events::EventLog;

/// Run `remaining` in order until one pauses or all complete.
pub fn run_sequence(
    engine: &Engine,
    mut state: GameState,
    mut remaining: Vector<Effect>,
    ctx: EffectContext,
) -> EngineResult<Outcome> {
    let mut events = EventLog::new();
    while let Some(effect) = remaining.pop_front() {
        let depth = state.frame_depth();
        match engine.execute(state, &effect, &ctx)? {
            Outcome::Completed { state: next, events: more } => {
                state = next;
                events.extend(more);
            }
            Outcome::Paused { state: mut paused, decision, events: more } => {
                if !remaining.is_empty() {
                    trace!(left = remaining.len(), depth, "sequence saved");
                    paused.insert_frame(depth, Continuation::Sequence(SequenceFrame { remaining, ctx }));
                }
                events.extend(more);
                return Ok(Outcome::paused(paused, decision, events));
            }
            failed @ Outcome::Failed { .. } => return Ok(failed),
        }
    }
    Ok(Outcome::completed(state, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, EngineConfig, PlayerId};
    use crate::decisions::DecisionResponse;
    use crate::effects::TargetRef;

    const P0: PlayerId = PlayerId::new(0);

    fn engine() -> Engine {
        Engine::new(EngineConfig::default())
    }

    #[test]
    fn test_leaf_sequence_completes() {
        let engine = engine();
        let state = engine.new_game();
        let effect = Effect::Sequence(vec![
            Effect::lose_life(2, TargetRef::You),
            Effect::gain_life(5, TargetRef::You),
        ]);
        let out = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        assert!(out.is_completed());
        assert_eq!(out.state().life(P0), 23);
        assert_eq!(out.events().len(), 2);
    }

    #[test]
    fn test_rest_saved_beneath_pause() {
        let engine = engine();
        let state = engine.new_game();
        let effect = Effect::Sequence(vec![
            Effect::lose_life(1, TargetRef::You),
            Effect::may("Gain 4?", Effect::gain_life(4, TargetRef::You)),
            Effect::lose_life(2, TargetRef::You),
        ]);
        let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        assert!(paused.is_paused());
        assert_eq!(paused.state().life(P0), 19);

        let frames = paused.state().continuations();
        assert_eq!(frames.len(), 2);
        assert!(matches!(frames[0], Continuation::Sequence(_)));
        assert!(matches!(frames[1], Continuation::May(_)));

        let done = engine.resume(paused.state(), DecisionResponse::YesNo(true));
        assert!(done.is_completed());
        assert_eq!(done.state().life(P0), 21);
        assert!(done.state().continuations().is_empty());
    }

    #[test]
    fn test_nested_sequences_keep_order() {
        let engine = engine();
        let state = engine.new_game();
        let inner = Effect::Sequence(vec![
            Effect::may("Lose 1?", Effect::lose_life(1, TargetRef::You)),
            Effect::lose_life(2, TargetRef::You),
        ]);
        let outer = Effect::Sequence(vec![inner, Effect::ModifyPlayerValue {
            who: TargetRef::You,
            key: "marker".to_string(),
            delta: 1,
        }]);
        let paused = engine.begin_action(&state, Action::resolve(outer, EffectContext::new(P0)));
        assert_eq!(paused.state().frame_depth(), 3);

        let done = engine.resume(paused.state(), DecisionResponse::YesNo(false));
        assert!(done.is_completed());
        assert_eq!(done.state().life(P0), 18);
        let marker = done.state().player(P0).map(|p| p.get_value("marker", 0));
        assert_eq!(marker, Some(1));
    }
}
