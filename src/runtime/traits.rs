//! Trait abstractions for runtime I/O
//!
//! The engine only talks to storage through `StateStore`, so tests can run
//! it against an in-memory implementation.

use crate::db::{Database, DbError};
use crate::state_machine::{DialogueState, FlowEventKind, Urgency};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Ticket not found: {0}")]
    TicketNotFound(String),
}

impl From<DbError> for StoreError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::TicketNotFound(id) => StoreError::TicketNotFound(id),
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Per-sender dialogue state, tickets and audit log
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Current state; senders never seen before have no active flow
    async fn get_state(&self, sender: &str) -> Result<DialogueState, StoreError>;

    async fn set_state(&self, sender: &str, state: &DialogueState) -> Result<(), StoreError>;

    async fn create_ticket(&self, sender: &str, ticket_id: &str) -> Result<(), StoreError>;

    async fn set_ticket_description(
        &self,
        sender: &str,
        ticket_id: &str,
        description: &str,
    ) -> Result<(), StoreError>;

    async fn set_ticket_urgency(
        &self,
        sender: &str,
        ticket_id: &str,
        urgency: Urgency,
    ) -> Result<(), StoreError>;

    async fn log_event(
        &self,
        sender: &str,
        event: FlowEventKind,
        value: Option<&str>,
    ) -> Result<(), StoreError>;

    /// Record an inbound message verbatim (audit only)
    async fn log_message(&self, sender: &str, text: &str) -> Result<(), StoreError>;
}

// ============================================================================
// Production Adapter
// ============================================================================

/// Adapter to use Database as a `StateStore`
#[derive(Clone)]
pub struct DatabaseStorage {
    db: Database,
}

impl DatabaseStorage {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn inner(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl StateStore for DatabaseStorage {
    async fn get_state(&self, sender: &str) -> Result<DialogueState, StoreError> {
        Ok(self.db.get_state(sender)?)
    }

    async fn set_state(&self, sender: &str, state: &DialogueState) -> Result<(), StoreError> {
        Ok(self.db.set_state(sender, state)?)
    }

    async fn create_ticket(&self, sender: &str, ticket_id: &str) -> Result<(), StoreError> {
        self.db.create_ticket(ticket_id, sender)?;
        Ok(())
    }

    async fn set_ticket_description(
        &self,
        sender: &str,
        ticket_id: &str,
        description: &str,
    ) -> Result<(), StoreError> {
        Ok(self
            .db
            .set_ticket_description(sender, ticket_id, description)?)
    }

    async fn set_ticket_urgency(
        &self,
        sender: &str,
        ticket_id: &str,
        urgency: Urgency,
    ) -> Result<(), StoreError> {
        Ok(self.db.set_ticket_urgency(sender, ticket_id, urgency)?)
    }

    async fn log_event(
        &self,
        sender: &str,
        event: FlowEventKind,
        value: Option<&str>,
    ) -> Result<(), StoreError> {
        self.db.log_event(sender, event.as_str(), value)?;
        Ok(())
    }

    async fn log_message(&self, sender: &str, text: &str) -> Result<(), StoreError> {
        self.db.log_message(sender, text)?;
        Ok(())
    }
}
