//! Creature-type polls.
//!
//! Each player names a creature type from the configured vocabulary. Once
//! every player has answered, the outcome is applied to all chosen types
//! at once. Battlefield creatures are matched on their projected types,
//! so granted or removed types count. Graveyard cards use printed types.

use im::Vector;
use tracing::debug;

use crate::cards::CardType;
use crate::continuations::{Ask, Continuation, CreatureTypeFrame, PlayerPoll, PollStep};
use crate::core::{EntityId, GameState, PlayerId};
use crate::decisions::{DecisionKind, DecisionResponse};
use crate::effects::primitives;
use crate::effects::{CreatureTypeOutcome, EffectContext, PlayerSet};
use crate::engine::{Engine, EngineError, EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};
use crate::zones::Zone;

use super::{ask, pause, poll_order, then_chain, ChainFn};

pub fn begin(
    engine: &Engine,
    state: GameState,
    players: &PlayerSet,
    outcome: CreatureTypeOutcome,
    ctx: EffectContext,
) -> EngineResult<Outcome> {
    let order = poll_order(&state, players, &ctx);
    let step = PlayerPoll::start(order, |player, _| ask_type(engine, &state, &ctx, player));
    advance(engine, state, step, outcome, ctx, EventLog::new())
}

pub fn resume(
    engine: &Engine,
    state: GameState,
    frame: CreatureTypeFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let index = response.into_choice()?;
    let CreatureTypeFrame { poll, options, outcome, ctx } = frame;
    let chosen = options
        .get(index)
        .cloned()
        .ok_or_else(|| EngineError::InvalidResponse(format!("creature type {index} does not exist")))?;

    let events = vec![GameEvent::CreatureTypeChosen { player: poll.current, creature_type: chosen.clone() }];
    let step = poll.answer(chosen, |player, _| ask_type(engine, &state, &ctx, player));
    then_chain(advance(engine, state, step, outcome, ctx, events)?, chain)
}

fn ask_type(engine: &Engine, state: &GameState, ctx: &EffectContext, player: PlayerId) -> Ask<String> {
    let options = engine.config().creature_types.clone();
    if options.is_empty() {
        return Ask::Skip;
    }
    Ask::Decide(ask(state, ctx, player, DecisionKind::ChooseOption { options }, "Choose a creature type"))
}

fn advance(
    engine: &Engine,
    state: GameState,
    step: PollStep<String>,
    outcome: CreatureTypeOutcome,
    ctx: EffectContext,
    events: EventLog,
) -> EngineResult<Outcome> {
    match step {
        PollStep::Ask { poll, decision } => {
            let options = match &decision.kind {
                DecisionKind::ChooseOption { options } => options.clone(),
                _ => Vec::new(),
            };
            pause(
                state,
                Continuation::CreatureTypePoll(CreatureTypeFrame { poll, options, outcome, ctx }),
                decision,
                events,
            )
        }
        PollStep::Done(answers) => {
            let chosen: Vec<String> = answers.into_iter().map(|(_, t)| t).collect();
            debug!(?chosen, ?outcome, "creature types chosen");
            Ok(apply(engine, state, outcome, &chosen).after(events))
        }
    }
}

fn apply(engine: &Engine, mut state: GameState, outcome: CreatureTypeOutcome, chosen: &[String]) -> Outcome {
    let mut events = EventLog::new();
    match outcome {
        CreatureTypeOutcome::DestroyAllExceptChosen => {
            let view = engine.projector().project(&state);
            let doomed: Vec<EntityId> = view
                .iter_sorted()
                .filter(|o| o.is(CardType::Creature))
                .filter(|o| !chosen.iter().any(|t| o.has_creature_type(t)))
                .map(|o| o.id)
                .collect();
            for id in doomed {
                primitives::destroy(&mut state, engine.projector(), id, &mut events);
            }
        }
        CreatureTypeOutcome::ReturnChosenFromGraveyard => {
            let returning: Vector<EntityId> = PlayerId::all(state.player_count())
                .flat_map(|p| state.cards_in(p, Zone::Graveyard))
                .filter(|id| {
                    state.object(*id).and_then(|c| c.card.as_ref()).is_some_and(|card| {
                        card.is(CardType::Creature) && chosen.iter().any(|t| card.has_subtype(t))
                    })
                })
                .collect();
            for id in returning {
                let Some(owner) = state.object(id).map(|c| c.owner) else { continue };
                primitives::put_onto_battlefield(&mut state, id, owner, &mut events);
            }
        }
    }
    Outcome::completed(state, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardData;
    use crate::core::{Action, EngineConfig};
    use crate::effects::Effect;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn engine() -> Engine {
        let types = ["Elf", "Goblin", "Zombie"].map(String::from).to_vec();
        Engine::new(EngineConfig::default().with_creature_types(types))
    }

    #[test]
    fn test_destroy_all_except_chosen() {
        let engine = engine();
        let mut state = engine.new_game();
        let elf = state.create_card(P0, CardData::creature("Elf", 1, 1).with_subtype("Elf"), Zone::Battlefield);
        let goblin =
            state.create_card(P1, CardData::creature("Goblin", 1, 1).with_subtype("Goblin"), Zone::Battlefield);
        let zombie =
            state.create_card(P1, CardData::creature("Zombie", 2, 2).with_subtype("Zombie"), Zone::Battlefield);

        let effect = Effect::EachPlayerChoosesCreatureType {
            players: PlayerSet::Each,
            outcome: CreatureTypeOutcome::DestroyAllExceptChosen,
        };
        let first = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        assert_eq!(first.decision().map(|d| d.player), Some(P0));

        let second = engine.resume(first.state(), DecisionResponse::Choice(0));
        assert!(second.state().is_on_battlefield(goblin), "nothing happens before the last answer");

        let done = engine.resume(second.state(), DecisionResponse::Choice(2));
        assert!(done.state().is_on_battlefield(elf));
        assert!(done.state().is_on_battlefield(zombie));
        assert!(!done.state().is_on_battlefield(goblin));
    }

    #[test]
    fn test_return_chosen_from_graveyards() {
        let engine = engine();
        let mut state = engine.new_game();
        let elf = state.create_card(P1, CardData::creature("Elf", 1, 1).with_subtype("Elf"), Zone::Graveyard);
        let goblin = state.create_card(P0, CardData::creature("Goblin", 1, 1).with_subtype("Goblin"), Zone::Graveyard);

        let effect = Effect::EachPlayerChoosesCreatureType {
            players: PlayerSet::Each,
            outcome: CreatureTypeOutcome::ReturnChosenFromGraveyard,
        };
        let first = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        let second = engine.resume(first.state(), DecisionResponse::Choice(0));
        let done = engine.resume(second.state(), DecisionResponse::Choice(0));

        assert!(done.state().is_on_battlefield(elf));
        assert_eq!(done.state().controller_of(elf), Some(P1));
        assert!(!done.state().is_on_battlefield(goblin));
    }

    /// The answer indexes the list that was offered, even when resumed by an
    /// engine with a different vocabulary.
    #[test]
    fn test_answer_uses_offered_types() {
        let engine = engine();
        let mut state = engine.new_game();
        let elf = state.create_card(P1, CardData::creature("Elf", 1, 1).with_subtype("Elf"), Zone::Battlefield);
        let goblin =
            state.create_card(P1, CardData::creature("Goblin", 1, 1).with_subtype("Goblin"), Zone::Battlefield);

        let effect = Effect::EachPlayerChoosesCreatureType {
            players: PlayerSet::Fixed(vec![P0]),
            outcome: CreatureTypeOutcome::DestroyAllExceptChosen,
        };
        let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        assert!(paused.is_paused());

        let reordered = ["Goblin", "Elf"].map(String::from).to_vec();
        let other = Engine::new(EngineConfig::default().with_creature_types(reordered));
        let done = other.resume(paused.state(), DecisionResponse::Choice(0));
        assert!(done.events().contains(&GameEvent::CreatureTypeChosen { player: P0, creature_type: "Elf".into() }));
        assert!(done.state().is_on_battlefield(elf));
        assert!(!done.state().is_on_battlefield(goblin));
    }

    #[test]
    fn test_empty_vocabulary_asks_nobody() {
        let engine = Engine::new(EngineConfig::default().with_creature_types(Vec::<String>::new()));
        let state = engine.new_game();
        let effect = Effect::EachPlayerChoosesCreatureType {
            players: PlayerSet::Each,
            outcome: CreatureTypeOutcome::ReturnChosenFromGraveyard,
        };
        let out = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        assert!(out.is_completed());
    }
}
