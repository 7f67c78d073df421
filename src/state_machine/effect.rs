//! Effects produced by state transitions

use super::state::Urgency;
use std::fmt;

/// Audit events written to the flow log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEventKind {
    SupportStart,
    SupportDescription,
    SupportUrgency,
    SupportDone,
    UnknownMessage,
}

impl FlowEventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FlowEventKind::SupportStart => "SUPPORT_START",
            FlowEventKind::SupportDescription => "SUPPORT_DESCRIPTION",
            FlowEventKind::SupportUrgency => "SUPPORT_URGENCY",
            FlowEventKind::SupportDone => "SUPPORT_DONE",
            FlowEventKind::UnknownMessage => "UNKNOWN_MESSAGE",
        }
    }
}

impl fmt::Display for FlowEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Effects to be applied, in order, after a transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Write the transition's new state for the sender
    PersistState,

    /// Open a new support ticket with empty fields
    CreateTicket { ticket_id: String },

    SetTicketDescription {
        ticket_id: String,
        description: String,
    },

    SetTicketUrgency { ticket_id: String, urgency: Urgency },

    /// Append to the flow audit log
    LogEvent {
        event: FlowEventKind,
        value: Option<String>,
    },
}

impl Effect {
    pub fn log(event: FlowEventKind) -> Self {
        Effect::LogEvent { event, value: None }
    }

    pub fn log_with_value(event: FlowEventKind, value: impl Into<String>) -> Self {
        Effect::LogEvent {
            event,
            value: Some(value.into()),
        }
    }
}
