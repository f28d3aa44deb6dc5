//! Divided damage.
//!
//! The controller splits an amount among the targets chosen earlier in the
//! resolution. When the split arrives, entries naming a target that can no
//! longer be dealt damage are dropped; the rest are dealt as assigned.

use crate::continuations::{Continuation, DivideFrame};
use crate::core::{GameState, Target};
use crate::decisions::{DecisionKind, DecisionResponse};
use crate::effects::primitives;
use crate::effects::{Amount, EffectContext};
use crate::engine::{Engine, EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};

use super::{ask, pause, ChainFn};

pub fn begin(engine: &Engine, mut state: GameState, amount: Amount, ctx: EffectContext) -> EngineResult<Outcome> {
    let total = ctx.amount(amount);
    let mut events = EventLog::new();
    let targets: Vec<Target> = ctx
        .legal_targets()
        .filter(|t| primitives::is_damageable(&state, engine.projector(), *t))
        .collect();

    if total == 0 {
        return Ok(Outcome::completed(state, events));
    }
    if targets.len() <= 1 {
        match targets.first() {
            Some(only) => primitives::deal_damage(&mut state, engine.projector(), ctx.source, *only, total, &mut events),
            None => events.push(GameEvent::skipped("no targets to divide damage among")),
        }
        return Ok(Outcome::completed(state, events));
    }

    let min_per_target = u32::from(total as usize >= targets.len());
    let kind = DecisionKind::Distribute { total, targets, min_per_target };
    let decision = ask(&state, &ctx, ctx.controller, kind, format!("Divide {total} damage"));
    pause(state, Continuation::DivideDamage(DivideFrame { amount, ctx }), decision, events)
}

pub fn resume(
    engine: &Engine,
    mut state: GameState,
    frame: DivideFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let assignment = response.into_distribution()?;
    let ctx = frame.ctx;

    let mut events = EventLog::new();
    for (target, amount) in assignment {
        let still_valid = ctx.legal_targets().any(|t| t == target) && primitives::is_damageable(&state, engine.projector(), target);
        if still_valid {
            primitives::deal_damage(&mut state, engine.projector(), ctx.source, target, amount, &mut events);
        } else {
            events.push(GameEvent::skipped(format!("{target} can no longer be dealt damage")));
        }
    }
    chain(state, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardData;
    use crate::core::{Action, EngineConfig, PlayerId};
    use crate::engine::EngineError;
    use crate::effects::Effect;
    use crate::zones::Zone;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    #[test]
    fn test_split_among_targets() {
        let engine = Engine::new(EngineConfig::default());
        let mut state = engine.new_game();
        let ogre = state.create_card(P1, CardData::creature("Ogre", 3, 3), Zone::Battlefield);
        let ctx = EffectContext::new(P0).with_targets([Target::Player(P1), Target::Object(ogre)]);

        let paused = engine.begin_action(&state, Action::resolve(Effect::DivideDamage { amount: Amount::Fixed(5) }, ctx));
        assert_eq!(
            paused.decision().map(|d| d.kind.clone()),
            Some(DecisionKind::Distribute {
                total: 5,
                targets: vec![Target::Player(P1), Target::Object(ogre)],
                min_per_target: 1,
            })
        );

        let done = engine.resume(
            paused.state(),
            DecisionResponse::Distribution(vec![(Target::Player(P1), 2), (Target::Object(ogre), 3)]),
        );
        assert_eq!(done.state().life(P1), 18);
        assert_eq!(done.state().location(ogre).map(|l| l.zone), Some(Zone::Graveyard));
    }

    /// A split that only adds up after wrapping is refused and the decision stays pending.
    #[test]
    fn test_wrapping_split_refused() {
        let engine = Engine::new(EngineConfig::default());
        let mut state = engine.new_game();
        let ogre = state.create_card(P1, CardData::creature("Ogre", 3, 3), Zone::Battlefield);
        let ctx = EffectContext::new(P0).with_targets([Target::Player(P1), Target::Object(ogre)]);
        let paused = engine.begin_action(&state, Action::resolve(Effect::DivideDamage { amount: Amount::Fixed(5) }, ctx));

        let out = engine.resume(
            paused.state(),
            DecisionResponse::Distribution(vec![(Target::Player(P1), u32::MAX), (Target::Object(ogre), 6)]),
        );
        assert!(matches!(out.error(), Some(EngineError::InvalidResponse(_))));
        assert_eq!(out.state(), paused.state());
        assert_eq!(out.state().life(P1), 20);
    }

    #[test]
    fn test_single_target_takes_everything() {
        let engine = Engine::new(EngineConfig::default());
        let state = engine.new_game();
        let ctx = EffectContext::new(P0).with_targets([Target::Player(P1)]);
        let out = engine.begin_action(&state, Action::resolve(Effect::DivideDamage { amount: Amount::Fixed(4) }, ctx));
        assert!(out.is_completed());
        assert_eq!(out.state().life(P1), 16);
    }
}
