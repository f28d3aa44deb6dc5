//! Announcing and resolving stack objects.

use tracing::debug;

use crate::cards::CardData;
use crate::continuations::{Continuation, FinishFrame, ManaFollowUp, TargetFollowUp};
use crate::core::{EntityId, GameState, PlayerId};
use crate::effects::primitives;
use crate::effects::{Effect, EffectContext, TargetRequirement};
use crate::engine::{Engine, EngineError, EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};
use crate::resume;
use crate::zones::Zone;

use super::object::{StackObject, StackObjectKind, TriggeredAbility};

// === Announcing ===

/// Cast a spell from `controller`'s hand.
///
/// The card moves to the stack zone straight away so it cannot be chosen
/// by its own announcement decisions. If announcing fails (no legal
/// targets) it returns to hand.
pub fn cast_spell(
    engine: &Engine,
    mut state: GameState,
    controller: PlayerId,
    card: EntityId,
    effect: Effect,
    requirement: Option<TargetRequirement>,
) -> EngineResult<Outcome> {
    if !state.in_hand_of(controller, card) {
        return Err(EngineError::NotInHand(card));
    }
    let name = state.object(card).map(|c| c.name().to_string()).unwrap_or_default();

    let mut events = EventLog::new();
    primitives::move_to_owner_zone(&mut state, card, Zone::Stack, &mut events);

    let object = StackObject {
        id: card,
        controller,
        kind: StackObjectKind::Spell,
        effect,
        context: EffectContext::new(controller).with_source(card, name),
        requirement,
    };
    Ok(announce(engine, state, object, None)?.after(events))
}

/// Announce a triggered ability: targets, then cost, then push.
pub fn announce_trigger(engine: &Engine, mut state: GameState, trigger: TriggeredAbility) -> EngineResult<Outcome> {
    let id = state.alloc_entity();
    let mut context = EffectContext::new(trigger.controller);
    context.source = trigger.source;
    context.source_name = Some(trigger.source_name);

    let object = StackObject {
        id,
        controller: trigger.controller,
        kind: StackObjectKind::Ability,
        effect: trigger.effect,
        context,
        requirement: trigger.requirement,
    };
    announce(engine, state, object, trigger.cost)
}

fn announce(engine: &Engine, state: GameState, object: StackObject, cost: Option<u32>) -> EngineResult<Outcome> {
    match object.requirement.clone() {
        Some(requirement) => {
            let ctx = object.context.clone();
            resume::targeting::begin(engine, state, requirement, TargetFollowUp::PutOnStack { object, cost }, ctx)
        }
        None => finish_announcement(engine, state, object, cost),
    }
}

/// Pay the announcement cost, if any, then push.
pub fn finish_announcement(
    engine: &Engine,
    state: GameState,
    object: StackObject,
    cost: Option<u32>,
) -> EngineResult<Outcome> {
    match cost {
        Some(amount) if amount > 0 => {
            resume::mana::begin(engine, state, object.controller, amount, ManaFollowUp::PutOnStack { object })
        }
        _ => Ok(push(state, object)),
    }
}

/// Put a fully announced object on the stack.
#[must_use]
pub fn push(mut state: GameState, object: StackObject) -> Outcome {
    debug!(id = %object.id, controller = %object.controller, "stack object pushed");
    let events = vec![GameEvent::StackObjectPushed { id: object.id, controller: object.controller }];
    state.push_stack(object);
    Outcome::completed(state, events)
}

/// Drop an object whose announcement could not finish.
///
/// A spell card returns to its owner's hand.
#[must_use]
pub fn abandon(mut state: GameState, object: StackObject, reason: &str) -> Outcome {
    debug!(id = %object.id, reason, "announcement abandoned");
    let mut events = EventLog::new();
    if object.is_spell() && state.location(object.id).is_some_and(|l| l.zone == Zone::Stack) {
        primitives::move_to_owner_zone(&mut state, object.id, Zone::Hand, &mut events);
    }
    let name = object.context.source_name.as_deref().unwrap_or("ability");
    events.push(GameEvent::skipped(format!("{name} was not put on the stack: {reason}")));
    Outcome::completed(state, events)
}

// === Resolving ===

/// Resolve the topmost stack object.
pub fn resolve_top(engine: &Engine, mut state: GameState) -> EngineResult<Outcome> {
    let object = state.pop_stack().ok_or(EngineError::EmptyStack)?;
    debug!(id = %object.id, "resolving");

    // Illegal targets keep their slot and resolve to nothing.
    let mut ctx = object.context.clone();
    let mut events = EventLog::new();
    if let Some(requirement) = &object.requirement {
        for (index, target) in object.context.targets.iter().enumerate() {
            if !engine.finder().is_legal(&state, requirement, object.controller, ctx.source, *target) {
                events.push(GameEvent::skipped(format!("{target} is no longer a legal target")));
                ctx = ctx.with_illegal(index);
            }
        }
        if !ctx.targets.is_empty() && ctx.illegal.len() == ctx.targets.len() {
            return Ok(fizzle(state, object));
        }
    }
    Ok(execute(engine, state, object, &ctx)?.after(events))
}

fn execute(engine: &Engine, state: GameState, object: StackObject, ctx: &EffectContext) -> EngineResult<Outcome> {
    let depth = state.frame_depth();
    match engine.execute(state, &object.effect, ctx)? {
        Outcome::Completed { state, events } => Ok(finish_resolution(state, object).after(events)),
        Outcome::Paused { mut state, decision, events } => {
            state.insert_frame(depth, Continuation::FinishResolution(FinishFrame { object }));
            Ok(Outcome::paused(state, decision, events))
        }
        failed => Ok(failed),
    }
}

fn fizzle(mut state: GameState, object: StackObject) -> Outcome {
    debug!(id = %object.id, "fizzled");
    let mut events = EventLog::new();
    if object.is_spell() {
        primitives::move_to_owner_zone(&mut state, object.id, Zone::Graveyard, &mut events);
    }
    events.push(GameEvent::Fizzled { id: object.id });
    Outcome::completed(state, events)
}

/// Cleanup after a stack object's effect has finished.
///
/// A spell still in the stack zone moves on: permanents enter the
/// battlefield under the spell's controller, everything else goes to the
/// graveyard.
#[must_use]
pub fn finish_resolution(mut state: GameState, object: StackObject) -> Outcome {
    let mut events = vec![GameEvent::StackObjectResolved { id: object.id }];
    let on_stack = state.location(object.id).is_some_and(|l| l.zone == Zone::Stack);
    if object.is_spell() && on_stack {
        let permanent = state
            .object(object.id)
            .and_then(|c| c.card.as_ref())
            .is_some_and(CardData::is_permanent);
        if permanent {
            primitives::put_onto_battlefield(&mut state, object.id, object.controller, &mut events);
        } else {
            primitives::move_to_owner_zone(&mut state, object.id, Zone::Graveyard, &mut events);
        }
    }
    Outcome::completed(state, events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardType;
    use crate::core::{Action, EngineConfig, Target};
    use crate::decisions::DecisionResponse;
    use crate::effects::TargetRef;

    const P0: PlayerId = PlayerId::new(0);
    const P1: PlayerId = PlayerId::new(1);

    fn setup() -> (Engine, GameState) {
        let engine = Engine::new(EngineConfig::default());
        let state = engine.new_game();
        (engine, state)
    }

    #[test]
    fn test_creature_spell_enters_battlefield() {
        let (engine, mut state) = setup();
        let bears = state.create_card(P0, CardData::creature("Grizzly Bears", 2, 2), Zone::Hand);

        let cast = engine.begin_action(
            &state,
            Action::CastSpell { controller: P0, card: bears, effect: Effect::Sequence(vec![]), requirement: None },
        );
        assert!(cast.is_completed());
        assert_eq!(cast.state().stack().len(), 1);
        assert_eq!(cast.state().location(bears).map(|l| l.zone), Some(Zone::Stack));

        let resolved = engine.begin_action(cast.state(), Action::ResolveTopOfStack);
        assert!(resolved.state().is_on_battlefield(bears));
        assert!(resolved.state().stack().is_empty());
    }

    #[test]
    fn test_sorcery_goes_to_graveyard() {
        let (engine, mut state) = setup();
        let spike = state.create_card(P0, CardData::new("Lava Spike", CardType::Sorcery), Zone::Hand);
        let effect = Effect::damage(3, TargetRef::Chosen(0));

        let cast = engine.begin_action(
            &state,
            Action::CastSpell {
                controller: P0,
                card: spike,
                effect,
                requirement: Some(TargetRequirement::player()),
            },
        );
        assert!(cast.is_paused());

        let announced = engine.resume(cast.state(), DecisionResponse::Targets(vec![Target::Player(P1)]));
        assert!(announced.is_completed());

        let resolved = engine.begin_action(announced.state(), Action::ResolveTopOfStack);
        assert_eq!(resolved.state().life(P1), 17);
        assert_eq!(resolved.state().location(spike).map(|l| l.zone), Some(Zone::Graveyard));
    }

    #[test]
    fn test_cast_requires_card_in_hand() {
        let (engine, mut state) = setup();
        let bears = state.create_card(P0, CardData::creature("Grizzly Bears", 2, 2), Zone::Library);
        let out = engine.begin_action(
            &state,
            Action::CastSpell { controller: P0, card: bears, effect: Effect::Sequence(vec![]), requirement: None },
        );
        assert_eq!(out.error(), Some(&EngineError::NotInHand(bears)));
    }

    #[test]
    fn test_resolve_empty_stack() {
        let (engine, state) = setup();
        let out = engine.begin_action(&state, Action::ResolveTopOfStack);
        assert_eq!(out.error(), Some(&EngineError::EmptyStack));
    }

    #[test]
    fn test_fizzles_when_target_gone() {
        let (engine, mut state) = setup();
        let bears = state.create_card(P1, CardData::creature("Grizzly Bears", 2, 2), Zone::Battlefield);
        let trigger = TriggeredAbility::new(P0, "Prodigal Pyromancer", Effect::damage(1, TargetRef::Chosen(0)))
            .with_targets(TargetRequirement::creature());

        let paused = engine.begin_action(&state, Action::PutTriggerOnStack(trigger));
        let announced = engine.resume(paused.state(), DecisionResponse::Targets(vec![Target::Object(bears)]));
        assert_eq!(announced.state().stack().len(), 1);

        let mut moved = announced.into_state();
        let mut scratch = EventLog::new();
        primitives::move_to_owner_zone(&mut moved, bears, Zone::Hand, &mut scratch);

        let resolved = engine.begin_action(&moved, Action::ResolveTopOfStack);
        assert!(resolved.events().iter().any(|e| matches!(e, GameEvent::Fizzled { .. })));
        assert!(!resolved.events().iter().any(|e| matches!(e, GameEvent::DamageDealt { .. })));
    }

    #[test]
    fn test_no_targets_returns_spell_to_hand() {
        let (engine, mut state) = setup();
        let murder = state.create_card(P0, CardData::new("Murder", CardType::Instant), Zone::Hand);
        let out = engine.begin_action(
            &state,
            Action::CastSpell {
                controller: P0,
                card: murder,
                effect: Effect::Destroy { what: TargetRef::Chosen(0) },
                requirement: Some(TargetRequirement::creature()),
            },
        );
        assert!(out.is_completed());
        assert!(out.state().in_hand_of(P0, murder));
        assert!(out.state().stack().is_empty());
    }
}
