//! Knowledge-brief injection.
//!
//! Reads the pending-brief queue written by the reassessment scheduler and
//! renders remedial briefs into the active agent's context as a pipeline
//! stage.

mod queue;
mod stage;

pub use queue::*;
pub use stage::*;
