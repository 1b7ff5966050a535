//! Context-assembly pipeline contract.
//!
//! Each turn, an ordered list of stages gets the same context bundle
//! {prompt, session, config} and may contribute rules to splice into the
//! agent's working context. Stages opt out with `None`; no stage failure
//! is ever fatal to the turn.

mod context;
mod runner;
mod stage;

pub use context::*;
pub use runner::*;
pub use stage::*;
