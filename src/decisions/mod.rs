//! Decisions and responses.
//!
//! When an effect needs input it returns a `Decision` to the host. The host
//! answers with a `DecisionResponse`, which is validated against the
//! pending decision before any continuation runs.

pub mod decision;
pub mod response;

pub use decision::{Decision, DecisionId, DecisionKind, Provenance};
pub use response::DecisionResponse;
