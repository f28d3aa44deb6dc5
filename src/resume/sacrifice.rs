//! "Each player sacrifices a permanent."
//!
//! Players choose in order. Control and characteristics come from the
//! projector. A player with nothing to sacrifice is skipped and a player
//! with exactly one candidate is not asked. Sacrifices happen together
//! after the last choice.

use im::Vector;

use crate::continuations::{Ask, Continuation, PlayerPoll, PollStep, SacrificeFrame};
use crate::core::{EntityId, GameState, PlayerId};
use crate::decisions::{DecisionKind, DecisionResponse};
use crate::effects::primitives;
use crate::effects::{CardFilter, EffectContext, PlayerSet};
use crate::engine::{Engine, EngineError, EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};

use super::{ask, pause, poll_order, then_chain, ChainFn};

pub fn begin(
    engine: &Engine,
    state: GameState,
    players: &PlayerSet,
    filter: CardFilter,
    ctx: EffectContext,
) -> EngineResult<Outcome> {
    let order = poll_order(&state, players, &ctx);
    let step = PlayerPoll::start(order, |player, _| ask_player(engine, &state, &ctx, &filter, player));
    advance(engine, state, step, filter, ctx)
}

pub fn resume(
    engine: &Engine,
    state: GameState,
    frame: SacrificeFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let chosen = response
        .into_cards()?
        .first()
        .copied()
        .ok_or_else(|| EngineError::InvalidResponse("a permanent must be chosen".to_string()))?;
    let SacrificeFrame { poll, filter, ctx } = frame;
    let step = poll.answer(chosen, |player, _| ask_player(engine, &state, &ctx, &filter, player));
    then_chain(advance(engine, state, step, filter, ctx)?, chain)
}

fn candidates(engine: &Engine, state: &GameState, filter: &CardFilter, player: PlayerId) -> Vec<EntityId> {
    engine
        .projector()
        .project(state)
        .iter_sorted()
        .filter(|o| o.controller == player && filter.matches_projected(o))
        .map(|o| o.id)
        .collect()
}

fn ask_player(
    engine: &Engine,
    state: &GameState,
    ctx: &EffectContext,
    filter: &CardFilter,
    player: PlayerId,
) -> Ask<EntityId> {
    let candidates = candidates(engine, state, filter, player);
    match candidates.as_slice() {
        [] => Ask::Skip,
        [only] => Ask::Answer(*only),
        _ => {
            let kind = DecisionKind::SelectCards { candidates, min: 1, max: 1 };
            Ask::Decide(ask(state, ctx, player, kind, "Choose a permanent to sacrifice"))
        }
    }
}

fn advance(
    engine: &Engine,
    state: GameState,
    step: PollStep<EntityId>,
    filter: CardFilter,
    ctx: EffectContext,
) -> EngineResult<Outcome> {
    match step {
        PollStep::Ask { poll, decision } => pause(
            state,
            Continuation::Sacrifice(SacrificeFrame { poll, filter, ctx }),
            decision,
            EventLog::new(),
        ),
        PollStep::Done(choices) => Ok(sacrifice_all(engine, state, &filter, &choices)),
    }
}

fn sacrifice_all(
    engine: &Engine,
    mut state: GameState,
    filter: &CardFilter,
    choices: &Vector<(PlayerId, EntityId)>,
) -> Outcome {
    let mut events = EventLog::new();
    // Legality is judged on the snapshot before any sacrifice.
    let legal: Vec<(PlayerId, bool)> = choices
        .iter()
        .map(|&(player, id)| (player, candidates(engine, &state, filter, player).contains(&id)))
        .collect();
    for (&(player, id), (_, ok)) in choices.iter().zip(legal) {
        if ok {
            primitives::sacrifice(&mut state, player, id, &mut events);
        } else {
            events.push(GameEvent::skipped(format!("{player} no longer controls {id}")));
        }
    }
    Outcome::completed(state, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardData, Color};
    use crate::core::{Action, EngineConfig};
    use crate::effects::Effect;
    use crate::zones::Zone;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    #[test]
    fn test_each_player_sacrifices() {
        let engine = Engine::new(EngineConfig::default());
        let mut state = engine.new_game();
        let wolf = state.create_card(P0, CardData::creature("Wolf", 2, 2), Zone::Battlefield);
        let elf = state.create_card(P1, CardData::creature("Elf", 1, 1), Zone::Battlefield);
        let ogre = state.create_card(P1, CardData::creature("Ogre", 3, 3), Zone::Battlefield);
        let forest = state.create_card(P1, CardData::land("Forest", Color::Green), Zone::Battlefield);

        let effect = Effect::Sacrifice { players: PlayerSet::Each, filter: CardFilter::creature() };
        let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));

        // P0 has one creature and is not asked.
        assert_eq!(paused.decision().map(|d| d.player), Some(P1));
        assert!(paused.state().is_on_battlefield(wolf));

        let done = engine.resume(paused.state(), DecisionResponse::Cards(vec![elf]));
        assert!(done.is_completed());
        assert!(!done.state().is_on_battlefield(wolf));
        assert!(!done.state().is_on_battlefield(elf));
        assert!(done.state().is_on_battlefield(ogre));
        assert!(done.state().is_on_battlefield(forest));
    }

    #[test]
    fn test_nothing_to_sacrifice() {
        let engine = Engine::new(EngineConfig::default());
        let state = engine.new_game();
        let effect = Effect::Sacrifice { players: PlayerSet::Opponents, filter: CardFilter::creature() };
        let out = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        assert!(out.is_completed());
        assert!(out.events().is_empty());
    }
}
