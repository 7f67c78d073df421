//! Database schema and record types

pub use crate::state_machine::state::{DialogueState, Urgency};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// SQL schema for initialization
pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sender TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_messages_sender ON messages(sender, id);

CREATE TABLE IF NOT EXISTS user_state (
    sender TEXT PRIMARY KEY,
    state TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS support_tickets (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    sender TEXT NOT NULL,
    description TEXT,
    urgency TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_tickets_sender ON support_tickets(sender, seq DESC);

CREATE TABLE IF NOT EXISTS flow_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sender TEXT NOT NULL,
    event TEXT NOT NULL,
    value TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_flow_events_sender ON flow_events(sender, id);
";

/// Support ticket record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SupportTicket {
    pub id: String,
    pub sender: String,
    pub description: Option<String>,
    pub urgency: Option<Urgency>,
    pub created_at: DateTime<Utc>,
}

/// Flow audit event record
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlowEvent {
    pub id: i64,
    pub sender: String,
    pub event: String,
    pub value: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Inbound message as logged
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoggedMessage {
    pub id: i64,
    pub sender: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}
