//! Core conversation-turn state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::{Event, TurnError};
pub use state::{ControlLabels, ConvContext, ConvState, HostKind, DEFAULT_ERROR_MESSAGE};
pub use transition::{transition, TransitionError};
