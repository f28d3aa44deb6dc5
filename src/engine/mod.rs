//! The resumable effect engine.
//!
//! The host talks to the engine through two entry points:
//!
//! - [`Engine::begin_action`] starts new work from an [`Action`].
//! - [`Engine::resume`] answers the pending decision.
//!
//! Both take a snapshot by reference and return an [`Outcome`] carrying a
//! new snapshot. The input snapshot is never modified, so a rejected input
//! leaves the host exactly where it was.
//!
//! ## The chain driver
//!
//! Resuming a decision consumes the decision frame on top of the
//! continuation stack. Whatever work waited beneath it (the rest of a
//! sequence, cleanup after a stack object resolves) is run by
//! [`Engine::continue_chain`], which pops work frames until one pauses or
//! the stack is empty.
//!
//! ```
//! use ccg_rules::core::{Action, EngineConfig, PlayerId};
//! use ccg_rules::decisions::DecisionResponse;
//! use ccg_rules::effects::{Effect, EffectContext, TargetRef};
//! use ccg_rules::engine::Engine;
//!
//! let engine = Engine::new(EngineConfig::default());
//! let state = engine.new_game();
//! let p0 = PlayerId::new(0);
//!
//! let effect = Effect::may("Gain 3 life?", Effect::gain_life(3, TargetRef::You));
//! let paused = engine.begin_action(&state, Action::resolve(effect, EffectContext::new(p0)));
//! assert!(paused.is_paused());
//!
//! let done = engine.resume(paused.state(), DecisionResponse::YesNo(true));
//! assert!(done.is_completed());
//! assert_eq!(done.state().life(p0), 23);
//! ```

pub mod error;
pub mod outcome;

use tracing::{debug, warn};

pub use error::{EngineError, EngineResult};
pub use outcome::Outcome;

use crate::continuations::Continuation;
use crate::core::{Action, EngineConfig, GameState};
use crate::decisions::DecisionResponse;
use crate::effects::{Effect, EffectContext, EffectExecutor, StandardEffects, StandardTargetFinder, TargetFinder};
use crate::events::{EventLog, GameEvent};
use crate::layers::{LayerProjector, Projector};
use crate::resume;
use crate::stack;

/// The engine: configuration plus its three collaborators.
pub struct Engine {
    config: EngineConfig,
    executor: Box<dyn EffectExecutor>,
    finder: Box<dyn TargetFinder>,
    projector: Box<dyn Projector>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine").field("config", &self.config).finish_non_exhaustive()
    }
}

impl Engine {
    /// Create an engine with the standard executor, finder and projector.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            executor: Box::new(StandardEffects),
            finder: Box::new(StandardTargetFinder::default()),
            projector: Box::new(LayerProjector),
        }
    }

    /// Replace the effect executor (builder pattern).
    #[must_use]
    pub fn with_executor(mut self, executor: impl EffectExecutor + 'static) -> Self {
        self.executor = Box::new(executor);
        self
    }

    /// Replace the target finder (builder pattern).
    #[must_use]
    pub fn with_target_finder(mut self, finder: impl TargetFinder + 'static) -> Self {
        self.finder = Box::new(finder);
        self
    }

    /// Replace the projector (builder pattern).
    #[must_use]
    pub fn with_projector(mut self, projector: impl Projector + 'static) -> Self {
        self.projector = Box::new(projector);
        self
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn finder(&self) -> &dyn TargetFinder {
        self.finder.as_ref()
    }

    #[must_use]
    pub fn projector(&self) -> &dyn Projector {
        self.projector.as_ref()
    }

    /// A fresh snapshot for this engine's configuration.
    #[must_use]
    pub fn new_game(&self) -> GameState {
        GameState::new(&self.config)
    }

    // === Entry points ===

    /// Start new work. Fails if a decision is pending.
    pub fn begin_action(&self, state: &GameState, action: Action) -> Outcome {
        debug!(action = action.name(), "begin action");
        let result = match state.pending() {
            Some(pending) => Err(EngineError::DecisionAlreadyPending(pending.id)),
            None => self.apply_action(state.clone(), action),
        };
        Self::settle(state, result)
    }

    /// Answer the pending decision.
    pub fn resume(&self, state: &GameState, response: DecisionResponse) -> Outcome {
        let result = self.try_resume(state.clone(), response);
        Self::settle(state, result)
    }

    fn settle(original: &GameState, result: EngineResult<Outcome>) -> Outcome {
        match result {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(%error, "input rejected");
                Outcome::Failed { state: original.clone(), error }
            }
        }
    }

    fn apply_action(&self, state: GameState, action: Action) -> EngineResult<Outcome> {
        let outcome = match action {
            Action::Resolve { effect, context } => self.execute(state, &effect, &context)?,
            Action::CastSpell { controller, card, effect, requirement } => {
                stack::cast_spell(self, state, controller, card, effect, requirement)?
            }
            Action::PutTriggerOnStack(trigger) => stack::announce_trigger(self, state, trigger)?,
            Action::ResolveTopOfStack => stack::resolve_top(self, state)?,
        };
        resume::then_chain(outcome, &|s, e| self.continue_chain(s, e))
    }

    fn try_resume(&self, mut state: GameState, response: DecisionResponse) -> EngineResult<Outcome> {
        let decision = state.take_pending().ok_or(EngineError::NoPendingDecision)?;
        decision.validate(&response)?;

        let frame = state.pop_frame().ok_or(EngineError::OrphanDecision)?;
        if frame.is_work() {
            return Err(EngineError::OrphanDecision);
        }
        debug!(decision = %decision.id, player = %decision.player, frame = frame.name(), "resume");

        let answered = vec![GameEvent::DecisionAnswered { decision: decision.id, player: decision.player }];
        let outcome = resume::dispatch(self, state, frame, response, &|s, e| self.continue_chain(s, e))?;
        Ok(outcome.after(answered))
    }

    // === Execution ===

    /// Execute one effect with the configured executor.
    ///
    /// Does not run the chain driver.
    pub fn execute(&self, state: GameState, effect: &Effect, ctx: &EffectContext) -> EngineResult<Outcome> {
        self.executor.execute(self, state, effect, ctx)
    }

    /// Pop and run work frames until one pauses or the stack is empty.
    ///
    /// Reaching a decision frame here means a decision frame was left
    /// behind without a pending decision, which is an invariant violation.
    pub fn continue_chain(&self, mut state: GameState, mut events: EventLog) -> EngineResult<Outcome> {
        let mut steps = 0usize;
        loop {
            let Some(frame) = state.pop_frame() else {
                return Ok(Outcome::completed(state, events));
            };
            steps += 1;
            if steps > self.config.max_chain_depth {
                return Err(EngineError::ChainDepthExceeded(self.config.max_chain_depth));
            }

            let outcome = match frame {
                Continuation::Sequence(frame) => resume::composite::run_sequence(self, state, frame.remaining, frame.ctx)?,
                Continuation::FinishResolution(frame) => stack::finish_resolution(state, frame.object),
                other => {
                    return Err(EngineError::UnexpectedFrame { found: other.name(), context: "continuing the chain" });
                }
            };

            match outcome {
                Outcome::Completed { state: next, events: more } => {
                    state = next;
                    events.extend(more);
                }
                other => return Ok(other.after(events)),
            }
        }
    }
}
