//! Multi-player polls and stale-snapshot integration tests.
//!
//! Polls ask several players in turn order and apply everything after the
//! last answer. Between any two answers the host may change the snapshot;
//! resumers must degrade to a skip rather than fail.

use ccg_rules::cards::CardData;
use ccg_rules::core::{Action, EngineConfig, EntityId, GameState, PlayerId, Target};
use ccg_rules::decisions::{DecisionKind, DecisionResponse};
use ccg_rules::effects::primitives;
use ccg_rules::effects::{Amount, CardFilter, Effect, EffectContext, PlayerSet, TargetRef, TargetRequirement};
use ccg_rules::engine::Engine;
use ccg_rules::events::{EventLog, GameEvent};
use ccg_rules::zones::Zone;

const P0: PlayerId = PlayerId::new(0);
const P1: PlayerId = PlayerId::new(1);
const P2: PlayerId = PlayerId::new(2);

fn three_players() -> (Engine, GameState) {
    let engine = Engine::new(EngineConfig::new(3));
    let state = engine.new_game();
    (engine, state)
}

fn skipped(events: &[GameEvent]) -> usize {
    events.iter().filter(|e| matches!(e, GameEvent::ActionSkipped { .. })).count()
}

/// Remove an object from play behind the engine's back.
fn remove(state: &mut GameState, id: EntityId) {
    let mut scratch = EventLog::new();
    primitives::move_to_owner_zone(state, id, Zone::Graveyard, &mut scratch);
}

// =============================================================================
// Secret Bids
// =============================================================================

/// Bids of 2, 5 and 5: both players tied for the highest bid lose 5.
#[test]
fn test_tied_highest_bidders_lose() {
    let (engine, state) = three_players();
    let effect = Effect::SecretBid { players: PlayerSet::Each, cap: None };
    let mut out = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));

    for (expected, bid) in [(P0, 2), (P1, 5), (P2, 5)] {
        let decision = out.decision().cloned().expect("a bid is asked");
        assert_eq!(decision.player, expected);
        assert_eq!(decision.kind, DecisionKind::Number { min: 0, max: 20 });
        assert!(!out.events().iter().any(|e| matches!(e, GameEvent::BidRevealed { .. })));
        out = engine.resume(out.state(), DecisionResponse::Number(bid));
    }

    assert!(out.is_completed());
    let revealed: Vec<_> = out
        .events()
        .iter()
        .filter_map(|e| match e {
            GameEvent::BidRevealed { player, bid } => Some((*player, *bid)),
            _ => None,
        })
        .collect();
    assert_eq!(revealed, vec![(P0, 2), (P1, 5), (P2, 5)]);
    assert_eq!(out.state().life(P0), 20);
    assert_eq!(out.state().life(P1), 15);
    assert_eq!(out.state().life(P2), 15);
}

/// A bid above the allowed maximum is rejected and asked again.
#[test]
fn test_bid_over_cap_rejected() {
    let (engine, state) = three_players();
    let effect = Effect::SecretBid { players: PlayerSet::Each, cap: Some(3) };
    let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));

    let rejected = engine.resume(paused.state(), DecisionResponse::Number(4));
    assert!(rejected.is_failed());
    assert_eq!(rejected.state().pending().map(|d| d.player), Some(P0));
}

// =============================================================================
// Put From Hand
// =============================================================================

/// An opponent with an empty hand is skipped; the other one is asked.
#[test]
fn test_empty_hand_opponent_skipped() {
    let (engine, mut state) = three_players();
    let dragon = state.create_card(P2, CardData::creature("Dragon", 5, 5), Zone::Hand);
    let effect = Effect::EachPlayerMayPutFromHand { players: PlayerSet::Opponents, filter: CardFilter::creature() };

    let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
    let decision = paused.decision().cloned().expect("P2 is asked");
    assert_eq!(decision.player, P2);
    assert_eq!(decision.kind, DecisionKind::SelectCards { candidates: vec![dragon], min: 0, max: 1 });

    let done = engine.resume(paused.state(), DecisionResponse::Cards(vec![dragon]));
    assert!(done.is_completed());
    assert!(done.state().is_on_battlefield(dragon));
    assert_eq!(done.state().controller_of(dragon), Some(P2));
}

/// A card put from hand is checked again once every player has answered.
#[test]
fn test_put_from_hand_card_gone() {
    let (engine, mut state) = three_players();
    let elf = state.create_card(P1, CardData::creature("Elf", 1, 1), Zone::Hand);
    let ogre = state.create_card(P2, CardData::creature("Ogre", 3, 3), Zone::Hand);
    let effect = Effect::EachPlayerMayPutFromHand { players: PlayerSet::Opponents, filter: CardFilter::creature() };

    let first = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
    let second = engine.resume(first.state(), DecisionResponse::Cards(vec![elf]));
    assert_eq!(second.decision().map(|d| d.player), Some(P2));

    let mut stale = second.into_state();
    remove(&mut stale, elf);

    let done = engine.resume(&stale, DecisionResponse::Cards(vec![ogre]));
    assert!(done.is_completed());
    assert!(!done.state().is_on_battlefield(elf));
    assert!(done.state().is_on_battlefield(ogre));
    assert_eq!(skipped(done.events()), 1);
}

// =============================================================================
// Stale Targets
// =============================================================================

/// Damage assigned to a target destroyed before the answer is dropped.
#[test]
fn test_divided_damage_target_destroyed() {
    let (engine, mut state) = three_players();
    let ogre = state.create_card(P1, CardData::creature("Ogre", 3, 3), Zone::Battlefield);
    let elf = state.create_card(P2, CardData::creature("Elf", 1, 1), Zone::Battlefield);
    let ctx = EffectContext::new(P0).with_targets([Target::Player(P1), Target::Object(ogre), Target::Object(elf)]);
    let effect = Effect::DivideDamage { amount: Amount::Fixed(6) };

    let paused = engine.begin_action(&state, Action::resolve(effect, ctx));
    assert!(matches!(
        paused.decision().map(|d| &d.kind),
        Some(DecisionKind::Distribute { total: 6, min_per_target: 1, .. })
    ));

    let mut stale = paused.into_state();
    remove(&mut stale, elf);

    let done = engine.resume(
        &stale,
        DecisionResponse::Distribution(vec![(Target::Player(P1), 2), (Target::Object(ogre), 2), (Target::Object(elf), 2)]),
    );
    assert!(done.is_completed(), "a vanished target is not an error");
    assert_eq!(done.state().life(P1), 18);
    assert_eq!(done.state().object(ogre).map(|c| c.damage), Some(2));
    assert_eq!(skipped(done.events()), 1);
}

/// A chosen target that left the battlefield is dropped without error.
#[test]
fn test_chosen_target_gone() {
    let (engine, mut state) = three_players();
    let ogre = state.create_card(P1, CardData::creature("Ogre", 3, 3), Zone::Battlefield);
    let elf = state.create_card(P2, CardData::creature("Elf", 1, 1), Zone::Battlefield);
    let effect = Effect::with_targets(TargetRequirement::creature(), Effect::Destroy { what: TargetRef::Chosen(0) });

    let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
    let mut stale = paused.into_state();
    remove(&mut stale, ogre);

    let done = engine.resume(&stale, DecisionResponse::Targets(vec![Target::Object(ogre)]));
    assert!(done.is_completed());
    assert!(done.state().is_on_battlefield(elf));
    assert!(!done.events().iter().any(|e| matches!(e, GameEvent::Destroyed { .. })));
    assert!(skipped(done.events()) >= 1);
}

/// A sacrifice chosen by one player stays legal even if another player's
/// choice was removed in between.
#[test]
fn test_sacrifice_after_removal() {
    let (engine, mut state) = three_players();
    let wolf = state.create_card(P1, CardData::creature("Wolf", 2, 2), Zone::Battlefield);
    let bear = state.create_card(P1, CardData::creature("Bear", 2, 2), Zone::Battlefield);
    let elf = state.create_card(P2, CardData::creature("Elf", 1, 1), Zone::Battlefield);
    let ogre = state.create_card(P2, CardData::creature("Ogre", 3, 3), Zone::Battlefield);
    let effect = Effect::Sacrifice { players: PlayerSet::Opponents, filter: CardFilter::creature() };

    let first = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
    let second = engine.resume(first.state(), DecisionResponse::Cards(vec![wolf]));
    let mut stale = second.into_state();
    remove(&mut stale, wolf);

    let done = engine.resume(&stale, DecisionResponse::Cards(vec![ogre]));
    assert!(done.is_completed());
    assert!(done.state().is_on_battlefield(bear));
    assert!(done.state().is_on_battlefield(elf));
    assert!(!done.state().is_on_battlefield(ogre));
    assert_eq!(skipped(done.events()), 1);
}
