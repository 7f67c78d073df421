//! Dialogue state types

use crate::intent::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Dialogue State
// ============================================================================

/// Where a sender currently is in the guided dialogue.
///
/// The support flow carries the id of the ticket it is filling in, so later
/// turns update that exact ticket rather than whichever one is newest.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogueState {
    /// No active flow; free text goes to the intent classifier
    #[default]
    NoFlow,

    /// Menu shown, waiting for a numbered choice
    Menu,

    /// Filling in a support ticket
    Support {
        ticket_id: String,
        step: SupportStep,
    },
}

/// Which ticket field the support flow is waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportStep {
    Description,
    Urgency,
}

impl DialogueState {
    pub fn support(ticket_id: impl Into<String>, step: SupportStep) -> Self {
        DialogueState::Support {
            ticket_id: ticket_id.into(),
            step,
        }
    }

    /// Flat view used in logs and the audit API
    pub fn kind(&self) -> StateKind {
        match self {
            DialogueState::NoFlow => StateKind::None,
            DialogueState::Menu => StateKind::Menu,
            DialogueState::Support {
                step: SupportStep::Description,
                ..
            } => StateKind::SupportDescription,
            DialogueState::Support {
                step: SupportStep::Urgency,
                ..
            } => StateKind::SupportUrgency,
        }
    }

    pub fn ticket_id(&self) -> Option<&str> {
        match self {
            DialogueState::Support { ticket_id, .. } => Some(ticket_id),
            _ => None,
        }
    }
}

/// Flat enumeration of dialogue states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateKind {
    None,
    Menu,
    SupportDescription,
    SupportUrgency,
}

impl StateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StateKind::None => "NONE",
            StateKind::Menu => "MENU",
            StateKind::SupportDescription => "SUPPORT_DESCRIPTION",
            StateKind::SupportUrgency => "SUPPORT_URGENCY",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Urgency
// ============================================================================

/// Ticket urgency. Stored in its normalized Portuguese spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Urgency {
    #[serde(rename = "baixa")]
    Low,
    #[serde(rename = "media")]
    Medium,
    #[serde(rename = "alta")]
    High,
}

impl Urgency {
    /// Parse a reply, ignoring case, accents and punctuation.
    pub fn parse(text: &str) -> Option<Self> {
        match normalize(text).as_str() {
            "baixa" => Some(Urgency::Low),
            "media" => Some(Urgency::Medium),
            "alta" => Some(Urgency::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "baixa",
            Urgency::Medium => "media",
            Urgency::High => "alta",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Turn Context
// ============================================================================

/// Per-message inputs to the transition besides state and text
#[derive(Debug, Clone)]
pub struct TurnContext {
    /// Id assigned to a ticket if this turn opens one
    pub fresh_ticket_id: String,
}

impl TurnContext {
    pub fn new(fresh_ticket_id: impl Into<String>) -> Self {
        Self {
            fresh_ticket_id: fresh_ticket_id.into(),
        }
    }
}
