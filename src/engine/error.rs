//! Engine errors.
//!
//! Errors are reserved for protocol violations (answering when nothing is
//! pending, answering with the wrong shape) and broken invariants. Game
//! situations such as a vanished target are not errors; those degrade to a
//! skip inside the resumer.

use crate::decisions::DecisionId;

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;

/// Why an input was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("no decision is pending")]
    NoPendingDecision,

    #[error("a decision is already pending ({0})")]
    DecisionAlreadyPending(DecisionId),

    #[error("response does not match the pending decision: expected {expected}, got {got}")]
    ResponseMismatch { expected: &'static str, got: &'static str },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("a decision is pending but there is no decision frame")]
    OrphanDecision,

    #[error("unexpected {found} frame while {context}")]
    UnexpectedFrame { found: &'static str, context: &'static str },

    #[error("chain driver exceeded {0} work frames")]
    ChainDepthExceeded(usize),

    #[error("the stack is empty")]
    EmptyStack,

    #[error("{0} is not a card in its controller's hand")]
    NotInHand(crate::core::EntityId),

    #[error("snapshot codec error: {0}")]
    Codec(String),
}

impl From<bincode::Error> for EngineError {
    fn from(err: bincode::Error) -> Self {
        EngineError::Codec(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(EngineError::NoPendingDecision.to_string(), "no decision is pending");
        assert_eq!(
            EngineError::ResponseMismatch { expected: "cards", got: "number" }.to_string(),
            "response does not match the pending decision: expected cards, got number"
        );
    }

    #[test]
    fn test_codec_error_from_bincode() {
        let err: EngineError = bincode::deserialize::<u64>(&[1, 2]).unwrap_err().into();
        assert!(matches!(err, EngineError::Codec(_)));
    }
}
