//! Result of processing one input.

use crate::core::GameState;
use crate::decisions::Decision;
use crate::events::{EventLog, GameEvent};

use super::error::EngineError;

/// What happened after one call into the engine.
///
/// Every variant carries a snapshot. A failed input carries the snapshot
/// the input was applied to, unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// All work finished.
    Completed { state: GameState, events: EventLog },
    /// Waiting for `decision`.
    Paused { state: GameState, decision: Decision, events: EventLog },
    /// The input was rejected.
    Failed { state: GameState, error: EngineError },
}

impl Outcome {
    #[must_use]
    pub fn completed(state: GameState, events: EventLog) -> Self {
        Outcome::Completed { state, events }
    }

    #[must_use]
    pub fn paused(state: GameState, decision: Decision, events: EventLog) -> Self {
        Outcome::Paused { state, decision, events }
    }

    /// The resulting snapshot.
    #[must_use]
    pub fn state(&self) -> &GameState {
        match self {
            Outcome::Completed { state, .. } | Outcome::Paused { state, .. } | Outcome::Failed { state, .. } => state,
        }
    }

    /// Take the resulting snapshot.
    #[must_use]
    pub fn into_state(self) -> GameState {
        match self {
            Outcome::Completed { state, .. } | Outcome::Paused { state, .. } | Outcome::Failed { state, .. } => state,
        }
    }

    /// Events emitted (empty for a failed input).
    #[must_use]
    pub fn events(&self) -> &[GameEvent] {
        match self {
            Outcome::Completed { events, .. } | Outcome::Paused { events, .. } => events,
            Outcome::Failed { .. } => &[],
        }
    }

    #[must_use]
    pub fn decision(&self) -> Option<&Decision> {
        match self {
            Outcome::Paused { decision, .. } => Some(decision),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&EngineError> {
        match self {
            Outcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Outcome::Completed { .. })
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        matches!(self, Outcome::Paused { .. })
    }

    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }

    /// Put `earlier` in front of this outcome's events.
    #[must_use]
    pub fn after(self, mut earlier: EventLog) -> Self {
        match self {
            Outcome::Completed { state, events } => {
                earlier.extend(events);
                Outcome::Completed { state, events: earlier }
            }
            Outcome::Paused { state, decision, events } => {
                earlier.extend(events);
                Outcome::Paused { state, decision, events: earlier }
            }
            failed @ Outcome::Failed { .. } => failed,
        }
    }
}
