//! The action stack.
//!
//! Spells and triggered abilities are announced, then wait on the stack
//! until the host asks for the top object to resolve. Both steps may pause:
//!
//! - **Announcing** may need targets and, for abilities with a cost, a mana
//!   payment. The object is pushed only after every announcement decision
//!   succeeds.
//! - **Resolving** runs the object's effect, which may pause any number of
//!   times. Cleanup (moving a resolved spell to its destination) waits in a
//!   `FinishResolution` frame beneath those pauses.
//!
//! Target legality is checked again on resolution. An object whose targets
//! are all illegal fizzles without running its effect.

mod object;
mod resolution;

pub use object::{StackObject, StackObjectKind, TriggeredAbility};
pub use resolution::{
    abandon, announce_trigger, cast_spell, finish_announcement, finish_resolution, push, resolve_top,
};
