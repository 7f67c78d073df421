//! Conversation engine
//!
//! Applies transitions against the state store. `handle` surfaces faults as
//! `EngineError`; `respond` is the single place they become the apology.

use super::locks::SenderLocks;
use super::traits::{StateStore, StoreError};
use super::InboundMessage;
use crate::state_machine::{reply, transition, DialogueState, Effect, TransitionResult, TurnContext};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Inbound message has no sender")]
    MissingSender,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Decides and applies the reply for each inbound message
pub struct ConversationEngine<S: StateStore> {
    store: S,
    locks: SenderLocks,
}

impl<S: StateStore> ConversationEngine<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: SenderLocks::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Handle one message, returning the reply or the fault that stopped it.
    ///
    /// Effects already applied when a fault occurs are not rolled back.
    pub async fn handle(&self, message: &InboundMessage) -> Result<&'static str, EngineError> {
        let sender = message.sender.as_str();
        if sender.is_empty() {
            return Err(EngineError::MissingSender);
        }

        let _guard = self.locks.acquire(sender).await;

        if let Err(e) = self.store.log_message(sender, &message.body).await {
            tracing::warn!(sender, error = %e, "Failed to log inbound message");
        }

        let state = self.store.get_state(sender).await?;
        let ctx = TurnContext::new(uuid::Uuid::new_v4().to_string());
        let result = transition(&state, &ctx, &message.body);

        if let Some(classification) = result.classification {
            tracing::info!(
                sender,
                intent = ?classification.intent,
                confidence = classification.confidence,
                accepted = classification.accepted().is_some(),
                "Classified message"
            );
        }

        self.apply_effects(sender, &result).await?;

        tracing::debug!(
            sender,
            from = %state.kind(),
            to = %result.new_state.kind(),
            ticket_id = ?result.new_state.ticket_id(),
            state_written = result.persists_state(),
            "Transition applied"
        );

        Ok(result.reply)
    }

    /// Handle one message; any fault is logged and answered with an apology.
    pub async fn respond(&self, message: &InboundMessage) -> &'static str {
        match self.handle(message).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(
                    sender = %message.sender,
                    body = ?message.body,
                    error = %e,
                    "Unhandled error while handling message"
                );
                reply::APOLOGY
            }
        }
    }

    async fn apply_effects(&self, sender: &str, result: &TransitionResult) -> Result<(), StoreError> {
        for effect in &result.effects {
            self.apply(sender, &result.new_state, effect).await?;
        }
        Ok(())
    }

    async fn apply(
        &self,
        sender: &str,
        new_state: &DialogueState,
        effect: &Effect,
    ) -> Result<(), StoreError> {
        match effect {
            Effect::PersistState => self.store.set_state(sender, new_state).await,
            Effect::CreateTicket { ticket_id } => {
                tracing::info!(sender, ticket_id, "Opening support ticket");
                self.store.create_ticket(sender, ticket_id).await
            }
            Effect::SetTicketDescription {
                ticket_id,
                description,
            } => {
                self.store
                    .set_ticket_description(sender, ticket_id, description)
                    .await
            }
            Effect::SetTicketUrgency { ticket_id, urgency } => {
                self.store
                    .set_ticket_urgency(sender, ticket_id, *urgency)
                    .await
            }
            Effect::LogEvent { event, value } => {
                self.store
                    .log_event(sender, *event, value.as_deref())
                    .await
            }
        }
    }
}
