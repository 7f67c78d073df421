//! Mock implementations for testing
//!
//! These mocks let the engine run without a database.

use super::traits::{StateStore, StoreError};
use crate::db::SupportTicket;
use crate::state_machine::{DialogueState, FlowEventKind, Urgency};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

// ============================================================================
// In-memory Store
// ============================================================================

/// `StateStore` backed by plain collections, with inspection helpers
#[derive(Default)]
pub struct MemoryStore {
    states: Mutex<HashMap<String, DialogueState>>,
    tickets: Mutex<Vec<SupportTicket>>,
    events: Mutex<Vec<(String, FlowEventKind, Option<String>)>>,
    messages: Mutex<Vec<(String, String)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state_of(&self, sender: &str) -> DialogueState {
        self.states
            .lock()
            .unwrap()
            .get(sender)
            .cloned()
            .unwrap_or_default()
    }

    /// Tickets for a sender, oldest first
    pub fn tickets_for(&self, sender: &str) -> Vec<SupportTicket> {
        self.tickets
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.sender == sender)
            .cloned()
            .collect()
    }

    pub fn events_for(&self, sender: &str) -> Vec<(FlowEventKind, Option<String>)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _, _)| s == sender)
            .map(|(_, event, value)| (*event, value.clone()))
            .collect()
    }

    pub fn messages_for(&self, sender: &str) -> Vec<String> {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .filter(|(s, _)| s == sender)
            .map(|(_, body)| body.clone())
            .collect()
    }

    fn update_ticket(
        &self,
        sender: &str,
        ticket_id: &str,
        update: impl FnOnce(&mut SupportTicket),
    ) -> Result<(), StoreError> {
        let mut tickets = self.tickets.lock().unwrap();
        let ticket = tickets
            .iter_mut()
            .find(|t| t.id == ticket_id && t.sender == sender)
            .ok_or_else(|| StoreError::TicketNotFound(ticket_id.to_string()))?;
        update(ticket);
        Ok(())
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get_state(&self, sender: &str) -> Result<DialogueState, StoreError> {
        Ok(self.state_of(sender))
    }

    async fn set_state(&self, sender: &str, state: &DialogueState) -> Result<(), StoreError> {
        self.states
            .lock()
            .unwrap()
            .insert(sender.to_string(), state.clone());
        Ok(())
    }

    async fn create_ticket(&self, sender: &str, ticket_id: &str) -> Result<(), StoreError> {
        self.tickets.lock().unwrap().push(SupportTicket {
            id: ticket_id.to_string(),
            sender: sender.to_string(),
            description: None,
            urgency: None,
            created_at: Utc::now(),
        });
        Ok(())
    }

    async fn set_ticket_description(
        &self,
        sender: &str,
        ticket_id: &str,
        description: &str,
    ) -> Result<(), StoreError> {
        self.update_ticket(sender, ticket_id, |t| {
            t.description = Some(description.to_string());
        })
    }

    async fn set_ticket_urgency(
        &self,
        sender: &str,
        ticket_id: &str,
        urgency: Urgency,
    ) -> Result<(), StoreError> {
        self.update_ticket(sender, ticket_id, |t| t.urgency = Some(urgency))
    }

    async fn log_event(
        &self,
        sender: &str,
        event: FlowEventKind,
        value: Option<&str>,
    ) -> Result<(), StoreError> {
        self.events
            .lock()
            .unwrap()
            .push((sender.to_string(), event, value.map(String::from)));
        Ok(())
    }

    async fn log_message(&self, sender: &str, text: &str) -> Result<(), StoreError> {
        self.messages
            .lock()
            .unwrap()
            .push((sender.to_string(), text.to_string()));
        Ok(())
    }
}

// ============================================================================
// Failing Store
// ============================================================================

/// Store operations that `FailingStore` can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    GetState,
    SetState,
    CreateTicket,
    SetTicketDescription,
    SetTicketUrgency,
    LogEvent,
    LogMessage,
}

/// Wraps a `MemoryStore` and fails one operation as if storage were down
pub struct FailingStore {
    inner: MemoryStore,
    fail_on: StoreOp,
}

impl FailingStore {
    pub fn failing(op: StoreOp) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_on: op,
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(&self, op: StoreOp) -> Result<(), StoreError> {
        if op == self.fail_on {
            Err(StoreError::Unavailable(format!("{op:?}: database is locked")))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StateStore for FailingStore {
    async fn get_state(&self, sender: &str) -> Result<DialogueState, StoreError> {
        self.check(StoreOp::GetState)?;
        self.inner.get_state(sender).await
    }

    async fn set_state(&self, sender: &str, state: &DialogueState) -> Result<(), StoreError> {
        self.check(StoreOp::SetState)?;
        self.inner.set_state(sender, state).await
    }

    async fn create_ticket(&self, sender: &str, ticket_id: &str) -> Result<(), StoreError> {
        self.check(StoreOp::CreateTicket)?;
        self.inner.create_ticket(sender, ticket_id).await
    }

    async fn set_ticket_description(
        &self,
        sender: &str,
        ticket_id: &str,
        description: &str,
    ) -> Result<(), StoreError> {
        self.check(StoreOp::SetTicketDescription)?;
        self.inner
            .set_ticket_description(sender, ticket_id, description)
            .await
    }

    async fn set_ticket_urgency(
        &self,
        sender: &str,
        ticket_id: &str,
        urgency: Urgency,
    ) -> Result<(), StoreError> {
        self.check(StoreOp::SetTicketUrgency)?;
        self.inner
            .set_ticket_urgency(sender, ticket_id, urgency)
            .await
    }

    async fn log_event(
        &self,
        sender: &str,
        event: FlowEventKind,
        value: Option<&str>,
    ) -> Result<(), StoreError> {
        self.check(StoreOp::LogEvent)?;
        self.inner.log_event(sender, event, value).await
    }

    async fn log_message(&self, sender: &str, text: &str) -> Result<(), StoreError> {
        self.check(StoreOp::LogMessage)?;
        self.inner.log_message(sender, text).await
    }
}
