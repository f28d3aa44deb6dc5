//! Simple choices made by the effect's controller: "you may", modes,
//! colours and X values.

use crate::cards::Color;
use crate::continuations::{ChoiceFrame, Continuation, MayFrame, ModeFrame};
use crate::core::GameState;
use crate::decisions::{DecisionKind, DecisionResponse};
use crate::effects::{Effect, EffectContext, Mode};
use crate::engine::{Engine, EngineError, EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};

use super::{ask, pause, then_chain, ChainFn};

// === May ===

pub fn begin_may(
    state: GameState,
    prompt: &str,
    effect: Effect,
    otherwise: Option<Effect>,
    ctx: EffectContext,
) -> EngineResult<Outcome> {
    let decision = ask(&state, &ctx, ctx.controller, DecisionKind::YesNo, prompt);
    pause(state, Continuation::May(MayFrame { effect, otherwise, ctx }), decision, EventLog::new())
}

pub fn resume_may(
    engine: &Engine,
    state: GameState,
    frame: MayFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let chosen = if response.into_yes_no()? { Some(frame.effect) } else { frame.otherwise };
    match chosen {
        Some(effect) => then_chain(engine.execute(state, &effect, &frame.ctx)?, chain),
        None => chain(state, EventLog::new()),
    }
}

// === Modes ===

/// Ask for one mode. A single mode runs without asking.
pub fn begin_mode(engine: &Engine, state: GameState, modes: Vec<Mode>, ctx: EffectContext) -> EngineResult<Outcome> {
    match modes.as_slice() {
        [] => Ok(Outcome::completed(state, vec![GameEvent::skipped("no modes to choose from")])),
        [only] => engine.execute(state, &only.effect, &ctx),
        _ => {
            let options = modes.iter().map(|m| m.label.clone()).collect();
            let decision = ask(&state, &ctx, ctx.controller, DecisionKind::ChooseOption { options }, "Choose one");
            pause(state, Continuation::ChooseMode(ModeFrame { modes, ctx }), decision, EventLog::new())
        }
    }
}

pub fn resume_mode(
    engine: &Engine,
    state: GameState,
    frame: ModeFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let index = response.into_choice()?;
    let mode = frame
        .modes
        .get(index)
        .ok_or_else(|| EngineError::InvalidResponse(format!("mode {index} does not exist")))?;
    let events = vec![GameEvent::ModeChosen { player: frame.ctx.controller, index }];
    then_chain(engine.execute(state, &mode.effect, &frame.ctx)?.after(events), chain)
}

// === Colour ===

pub fn begin_color(state: GameState, effect: Effect, ctx: EffectContext) -> EngineResult<Outcome> {
    let kind = DecisionKind::Color { allowed: Color::ALL.to_vec() };
    let decision = ask(&state, &ctx, ctx.controller, kind, "Choose a color");
    pause(state, Continuation::ChooseColor(ChoiceFrame { effect, ctx }), decision, EventLog::new())
}

pub fn resume_color(
    engine: &Engine,
    state: GameState,
    frame: ChoiceFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let color = response.into_color()?;
    let events = vec![GameEvent::ColorChosen { player: frame.ctx.controller, color }];
    let ctx = frame.ctx.with_color(color);
    then_chain(engine.execute(state, &frame.effect, &ctx)?.after(events), chain)
}

// === Number ===

/// Ask for X in `0..=max`.
pub fn begin_number(state: GameState, max: u32, effect: Effect, ctx: EffectContext) -> EngineResult<Outcome> {
    let kind = DecisionKind::Number { min: 0, max };
    let decision = ask(&state, &ctx, ctx.controller, kind, format!("Choose X (0 to {max})"));
    pause(state, Continuation::ChooseNumber(ChoiceFrame { effect, ctx }), decision, EventLog::new())
}

pub fn resume_number(
    engine: &Engine,
    state: GameState,
    frame: ChoiceFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let value = response.into_number()?;
    let events = vec![GameEvent::NumberChosen { player: frame.ctx.controller, value }];
    let ctx = frame.ctx.with_number(value);
    then_chain(engine.execute(state, &frame.effect, &ctx)?.after(events), chain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Color;
    use crate::core::{Action, EngineConfig, PlayerId};
    use crate::effects::{Amount, ManaColor, TargetRef};

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn engine() -> Engine {
        Engine::new(EngineConfig::default())
    }

    #[test]
    fn test_may_declined_runs_otherwise() {
        let engine = engine();
        let state = engine.new_game();
        let effect = Effect::May {
            prompt: "Pay 2 life?".to_string(),
            effect: Box::new(Effect::lose_life(2, TargetRef::You)),
            otherwise: Some(Box::new(Effect::damage(3, TargetRef::Fixed(P1.into())))),
        };
        let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        let decision = paused.decision().cloned();
        assert_eq!(decision.map(|d| d.kind), Some(DecisionKind::YesNo));

        let done = engine.resume(paused.state(), DecisionResponse::YesNo(false));
        assert_eq!(done.state().life(P0), 20);
        assert_eq!(done.state().life(P1), 17);
    }

    #[test]
    fn test_mode_choice() {
        let engine = engine();
        let state = engine.new_game();
        let effect = Effect::ChooseMode {
            modes: vec![
                Mode::new("Gain 4 life", Effect::gain_life(4, TargetRef::You)),
                Mode::new("Draw a card", Effect::draw(1, TargetRef::You)),
            ],
        };
        let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        let done = engine.resume(paused.state(), DecisionResponse::Choice(0));
        assert_eq!(done.state().life(P0), 24);
        assert!(done.events().contains(&GameEvent::ModeChosen { player: P0, index: 0 }));
    }

    #[test]
    fn test_single_mode_needs_no_decision() {
        let engine = engine();
        let state = engine.new_game();
        let effect = Effect::ChooseMode { modes: vec![Mode::new("Gain 1", Effect::gain_life(1, TargetRef::You))] };
        let out = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        assert!(out.is_completed());
        assert_eq!(out.state().life(P0), 21);
    }

    #[test]
    fn test_color_feeds_mana() {
        let engine = engine();
        let state = engine.new_game();
        let effect = Effect::ChooseColor {
            effect: Box::new(Effect::AddMana { who: TargetRef::You, color: ManaColor::Chosen, amount: 3 }),
        };
        let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        let done = engine.resume(paused.state(), DecisionResponse::Color(Color::Green));
        let pool = done.state().player(P0).and_then(|p| p.mana_pool.get(&Color::Green).copied());
        assert_eq!(pool, Some(3));
    }

    #[test]
    fn test_x_value() {
        let engine = engine();
        let state = engine.new_game();
        let effect = Effect::ChooseNumber {
            max: 10,
            effect: Box::new(Effect::DealDamage { amount: Amount::Chosen, to: TargetRef::Fixed(P1.into()) }),
        };
        let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));

        let too_big = engine.resume(paused.state(), DecisionResponse::Number(11));
        assert!(too_big.is_failed());

        let done = engine.resume(paused.state(), DecisionResponse::Number(6));
        assert_eq!(done.state().life(P1), 14);
    }
}
