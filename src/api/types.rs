//! API request and response types

use crate::db::{FlowEvent, LoggedMessage, SupportTicket};
use crate::runtime::InboundMessage;
use crate::state_machine::{DialogueState, StateKind};
use serde::{Deserialize, Serialize};

/// Form fields posted by the messaging platform
#[derive(Debug, Deserialize)]
pub struct InboundForm {
    #[serde(rename = "Body", default)]
    pub body: String,
    #[serde(rename = "From", default)]
    pub from: String,
}

impl InboundForm {
    pub fn into_message(self) -> InboundMessage {
        InboundMessage::new(self.from, &self.body)
    }
}

/// Query for ticket listing
#[derive(Debug, Deserialize)]
pub struct TicketListQuery {
    pub sender: Option<String>,
}

/// Response with a list of tickets
#[derive(Debug, Serialize)]
pub struct TicketListResponse {
    pub tickets: Vec<SupportTicket>,
}

/// Response with a single ticket
#[derive(Debug, Serialize)]
pub struct TicketResponse {
    pub ticket: SupportTicket,
}

/// Response with a sender's flow events
#[derive(Debug, Serialize)]
pub struct FlowEventsResponse {
    pub sender: String,
    pub events: Vec<FlowEvent>,
}

/// Response with a sender's inbound messages
#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub sender: String,
    pub messages: Vec<LoggedMessage>,
}

/// Response with a sender's newest ticket, if any
#[derive(Debug, Serialize)]
pub struct LatestTicketResponse {
    pub sender: String,
    pub ticket: Option<SupportTicket>,
}

/// Response with a sender's dialogue state
#[derive(Debug, Serialize)]
pub struct SenderStateResponse {
    pub sender: String,
    pub kind: StateKind,
    pub state: DialogueState,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
