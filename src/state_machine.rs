//! Dialogue state machine
//!
//! Pure transitions: given the sender's current state and the inbound text,
//! decide the reply, the next state and the effects the engine must apply.

mod effect;
pub mod reply;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::{Effect, FlowEventKind};
pub use state::{DialogueState, StateKind, SupportStep, TurnContext, Urgency};
pub use transition::{transition, TransitionResult};
