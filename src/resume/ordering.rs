//! Look at the top cards of a library and put them back in any order.

use crate::continuations::{Continuation, OrderFrame};
use crate::core::{EntityId, GameState, PlayerId};
use crate::decisions::{DecisionKind, DecisionResponse};
use crate::effects::{EffectContext, LibraryEnd};
use crate::engine::{EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};
use crate::zones::{Location, Zone, ZonePosition};

use super::{ask, pause, ChainFn};

pub fn begin(state: GameState, player: PlayerId, count: u32, to: LibraryEnd, ctx: EffectContext) -> EngineResult<Outcome> {
    let objects = state.zones().top_n(player, Zone::Library, count as usize);
    if objects.len() <= 1 {
        let mut state = state;
        let events = place(&mut state, player, &objects, to);
        return Ok(Outcome::completed(state, events));
    }
    let prompt = match to {
        LibraryEnd::Top => "Put these cards back on top in any order",
        LibraryEnd::Bottom => "Put these cards on the bottom in any order",
    };
    let kind = DecisionKind::Order { objects: objects.clone() };
    let decision = ask(&state, &ctx, player, kind, prompt);
    pause(state, Continuation::OrderObjects(OrderFrame { player, objects, to, ctx }), decision, EventLog::new())
}

pub fn resume(
    mut state: GameState,
    frame: OrderFrame,
    response: DecisionResponse,
    chain: ChainFn<'_>,
) -> EngineResult<Outcome> {
    let order = response.into_order()?;
    let library = Location::new(frame.player, Zone::Library);

    let mut events = EventLog::new();
    let mut still_there = Vec::with_capacity(order.len());
    for card in order {
        if state.location(card) == Some(library) {
            still_there.push(card);
        } else {
            events.push(GameEvent::skipped(format!("{card} is no longer in the library")));
        }
    }
    events.extend(place(&mut state, frame.player, &still_there, frame.to));
    chain(state, events)
}

/// Put `cards` (listed topmost first) at one end of the library.
fn place(state: &mut GameState, player: PlayerId, cards: &[EntityId], to: LibraryEnd) -> EventLog {
    if cards.is_empty() {
        return EventLog::new();
    }
    let library = Location::new(player, Zone::Library);
    match to {
        LibraryEnd::Top => {
            for card in cards.iter().rev() {
                state.move_object_to(*card, library, ZonePosition::Top);
            }
        }
        LibraryEnd::Bottom => {
            for card in cards {
                state.move_object_to(*card, library, ZonePosition::Bottom);
            }
        }
    }
    vec![GameEvent::CardsReordered { player, cards: cards.to_vec() }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardData;
    use crate::core::{Action, EngineConfig};
    use crate::effects::{Effect, TargetRef};
    use crate::engine::Engine;

    const P0: PlayerId = PlayerId::new(0);

    fn library(state: &mut GameState, n: usize) -> Vec<EntityId> {
        (0..n).map(|i| state.create_card(P0, CardData::creature(format!("Card {i}"), 1, 1), Zone::Library)).collect()
    }

    #[test]
    fn test_reorder_top() {
        let engine = Engine::new(EngineConfig::default());
        let mut state = engine.new_game();
        let cards = library(&mut state, 4);
        let effect = Effect::LookAndOrder { who: TargetRef::You, count: 3, to: LibraryEnd::Top };

        let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        let Some(DecisionKind::Order { objects }) = paused.decision().map(|d| d.kind.clone()) else {
            panic!("expected an order decision");
        };
        assert_eq!(objects, vec![cards[3], cards[2], cards[1]]);

        let done = engine.resume(paused.state(), DecisionResponse::Order(vec![cards[1], cards[3], cards[2]]));
        let top: Vec<_> = done.state().zones().top_n(P0, Zone::Library, 4);
        assert_eq!(top, vec![cards[1], cards[3], cards[2], cards[0]]);
    }

    #[test]
    fn test_bottom_keeps_listed_order() {
        let engine = Engine::new(EngineConfig::default());
        let mut state = engine.new_game();
        let cards = library(&mut state, 3);
        let effect = Effect::LookAndOrder { who: TargetRef::You, count: 2, to: LibraryEnd::Bottom };

        let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(P0)));
        let done = engine.resume(paused.state(), DecisionResponse::Order(vec![cards[1], cards[2]]));
        let top: Vec<_> = done.state().zones().top_n(P0, Zone::Library, 3);
        assert_eq!(top, vec![cards[0], cards[1], cards[2]]);
    }
}
