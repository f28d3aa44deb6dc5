//! Effect execution.
//!
//! The `EffectExecutor` turns one effect into an outcome. Leaf effects are
//! applied in place and always complete. Composite and decision effects are
//! handed to their continuation family, which either completes or pushes a
//! frame and pauses.
//!
//! An executor never runs the chain driver itself; callers decide what
//! happens after a completed effect.

use tracing::trace;

use crate::core::{GameState, Target};
use crate::engine::{Engine, EngineResult, Outcome};
use crate::events::{EventLog, GameEvent};
use crate::layers::FloatingEffect;
use crate::resume;

use super::context::EffectContext;
use super::effect::{Effect, ManaColor};
use super::primitives;

/// Runs effects against a snapshot.
pub trait EffectExecutor: Send + Sync {
    /// Execute `effect` with `ctx`.
    fn execute(&self, engine: &Engine, state: GameState, effect: &Effect, ctx: &EffectContext) -> EngineResult<Outcome>;
}

/// Default executor covering every `Effect` variant.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardEffects;

impl StandardEffects {
    /// Apply a leaf effect. Returns false if `effect` is not a leaf.
    fn apply_leaf(
        engine: &Engine,
        state: &mut GameState,
        effect: &Effect,
        ctx: &EffectContext,
        events: &mut EventLog,
    ) -> bool {
        let projector = engine.projector();
        match effect {
            Effect::DealDamage { amount, to } => {
                let amount = ctx.amount(*amount);
                for target in ctx.resolve(*to) {
                    primitives::deal_damage(state, projector, ctx.source, target, amount, events);
                }
            }
            Effect::LoseLife { amount, who } => {
                for player in ctx.resolve_players(*who) {
                    primitives::lose_life(state, player, ctx.amount(*amount), events);
                }
            }
            Effect::GainLife { amount, who } => {
                for player in ctx.resolve_players(*who) {
                    primitives::gain_life(state, player, ctx.amount(*amount), events);
                }
            }
            Effect::DrawCards { count, who } => {
                for player in ctx.resolve_players(*who) {
                    primitives::draw(state, player, ctx.amount(*count), events);
                }
            }
            Effect::Mill { count, who } => {
                for player in ctx.resolve_players(*who) {
                    primitives::mill(state, player, *count, events);
                }
            }
            Effect::DiscardAtRandom { count, who } => {
                for player in ctx.resolve_players(*who) {
                    primitives::discard_at_random(state, player, *count, events);
                }
            }
            Effect::Destroy { what } => {
                for id in ctx.resolve_objects(*what) {
                    primitives::destroy(state, projector, id, events);
                }
            }
            Effect::Exile { what } => {
                for id in ctx.resolve_objects(*what) {
                    let from_stack = state.remove_stack_object(id).is_some();
                    if from_stack {
                        trace!(entity = %id, "exiled from the stack");
                    }
                    let moved = primitives::move_to_owner_zone(state, id, crate::zones::Zone::Exile, events);
                    if !from_stack && !moved {
                        events.push(GameEvent::skipped(format!("{id} no longer exists")));
                    }
                }
            }
            Effect::ReturnToHand { what } => {
                for id in ctx.resolve_objects(*what) {
                    if state.is_on_battlefield(id) {
                        primitives::move_to_owner_zone(state, id, crate::zones::Zone::Hand, events);
                    } else {
                        events.push(GameEvent::skipped(format!("{id} is no longer on the battlefield")));
                    }
                }
            }
            Effect::Tap { what } => {
                for id in ctx.resolve_objects(*what) {
                    primitives::set_tapped(state, id, true, events);
                }
            }
            Effect::Untap { what } => {
                for id in ctx.resolve_objects(*what) {
                    primitives::set_tapped(state, id, false, events);
                }
            }
            Effect::AddCounters { what, kind, count } => {
                for id in ctx.resolve_objects(*what) {
                    primitives::add_counters(state, id, *kind, *count, events);
                }
            }
            Effect::CounterSpell { what } => {
                for id in ctx.resolve_objects(*what) {
                    primitives::counter(state, id, events);
                }
            }
            Effect::AddMana { who, color, amount } => {
                let color = match color {
                    ManaColor::Fixed(c) => Some(*c),
                    ManaColor::Chosen => ctx.chosen_color,
                };
                let Some(color) = color else {
                    events.push(GameEvent::skipped("no color was chosen"));
                    return true;
                };
                for player in ctx.resolve_players(*who) {
                    primitives::add_mana(state, player, color, *amount, events);
                }
            }
            Effect::ApplyContinuous { modification, to, duration } => {
                let affected: Vec<_> = ctx
                    .resolve(*to)
                    .into_iter()
                    .filter_map(Target::as_object)
                    .filter(|id| state.is_on_battlefield(*id))
                    .collect();
                if affected.is_empty() {
                    events.push(GameEvent::skipped("no permanents to affect"));
                    return true;
                }
                let mut floating = FloatingEffect::new(modification.clone(), affected, *duration, ctx.controller);
                floating.source = ctx.source;
                let timestamp = state.add_floating(floating);
                events.push(GameEvent::ContinuousEffectCreated { timestamp });
            }
            Effect::ModifyPlayerValue { who, key, delta } => {
                for player in ctx.resolve_players(*who) {
                    if let Some(p) = state.player_mut(player) {
                        let current = p.get_value(key, 0);
                        p.values.insert(key.clone(), current + delta);
                    }
                }
            }
            _ => return false,
        }
        true
    }
}

impl EffectExecutor for StandardEffects {
    fn execute(
        &self,
        engine: &Engine,
        mut state: GameState,
        effect: &Effect,
        ctx: &EffectContext,
    ) -> EngineResult<Outcome> {
        let mut events = EventLog::new();
        if Self::apply_leaf(engine, &mut state, effect, ctx, &mut events) {
            return Ok(Outcome::completed(state, events));
        }

        match effect {
            Effect::Sequence(effects) => {
                resume::composite::run_sequence(engine, state, effects.iter().cloned().collect(), ctx.clone())
            }
            Effect::WithTargets { requirement, effect } => resume::targeting::begin(
                engine,
                state,
                requirement.clone(),
                crate::continuations::TargetFollowUp::Execute((**effect).clone()),
                ctx.clone(),
            ),
            Effect::May { prompt, effect, otherwise } => resume::choice::begin_may(
                state,
                prompt,
                (**effect).clone(),
                otherwise.as_deref().cloned(),
                ctx.clone(),
            ),
            Effect::ChooseMode { modes } => resume::choice::begin_mode(engine, state, modes.clone(), ctx.clone()),
            Effect::ChooseColor { effect } => resume::choice::begin_color(state, (**effect).clone(), ctx.clone()),
            Effect::ChooseNumber { max, effect } => {
                resume::choice::begin_number(state, *max, (**effect).clone(), ctx.clone())
            }
            Effect::PayOrElse { payer, amount, paid, unpaid } => {
                let Some(payer) = ctx.resolve_players(*payer).first().copied() else {
                    return Ok(Outcome::completed(state, vec![GameEvent::skipped("no player to pay")]));
                };
                resume::mana::begin(
                    engine,
                    state,
                    payer,
                    *amount,
                    crate::continuations::ManaFollowUp::Branches {
                        paid: paid.as_deref().cloned(),
                        unpaid: unpaid.as_deref().cloned(),
                        ctx: ctx.clone(),
                    },
                )
            }
            Effect::DivideDamage { amount } => resume::damage::begin(engine, state, *amount, ctx.clone()),
            Effect::SecretBid { players, cap } => resume::bidding::begin(state, players, *cap, ctx.clone()),
            Effect::EachPlayerMayPutFromHand { players, filter } => {
                resume::each_player::begin(state, players, filter.clone(), ctx.clone())
            }
            Effect::EachPlayerChoosesCreatureType { players, outcome } => {
                resume::creature_types::begin(engine, state, players, *outcome, ctx.clone())
            }
            Effect::DiscardOrLoseLife { players, life } => {
                resume::discard::begin_discard_or_life(state, players, *life, ctx.clone())
            }
            Effect::Discard { who, count } => {
                let Some(player) = ctx.resolve_players(*who).first().copied() else {
                    return Ok(Outcome::completed(state, vec![GameEvent::skipped("no player to discard")]));
                };
                resume::discard::begin_discard(state, player, *count, ctx.clone(), EventLog::new())
            }
            Effect::Sacrifice { players, filter } => {
                resume::sacrifice::begin(engine, state, players, filter.clone(), ctx.clone())
            }
            Effect::ReturnAurasFromGraveyard { who } => {
                let Some(player) = ctx.resolve_players(*who).first().copied() else {
                    return Ok(Outcome::completed(state, vec![GameEvent::skipped("no player to return auras")]));
                };
                resume::aura::begin(engine, state, player, ctx.clone())
            }
            Effect::LookAndOrder { who, count, to } => {
                let Some(player) = ctx.resolve_players(*who).first().copied() else {
                    return Ok(Outcome::completed(state, vec![GameEvent::skipped("no library to look at")]));
                };
                resume::ordering::begin(state, player, *count, *to, ctx.clone())
            }
            // Leaves were handled above.
            _ => Ok(Outcome::completed(state, events)),
        }
    }
}
