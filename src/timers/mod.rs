//! Nested wall clock timers for the solver phases.

#[allow(clippy::module_inception)]
mod timers;
pub use timers::*;
