//! Runtime for handling inbound messages
//!
//! Drives the pure state machine against a `StateStore`: one read of the
//! sender's state, one transition, effects applied in order, one reply.

mod engine;
mod locks;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use engine::{ConversationEngine, EngineError};
pub use traits::*;

/// Engine wired to the `SQLite` store
pub type ProductionEngine = ConversationEngine<DatabaseStorage>;

/// A message received from the messaging platform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    /// Opaque sender address, e.g. `whatsapp:+5511999990000`
    pub sender: String,
    pub body: String,
}

impl InboundMessage {
    /// Build from raw transport fields; the body is trimmed
    pub fn new(sender: impl Into<String>, body: &str) -> Self {
        Self {
            sender: sender.into(),
            body: body.trim().to_string(),
        }
    }
}
