//! Pure state transition function
//!
//! Every call yields exactly one reply and writes state at most once
//! (`Effect::PersistState` appears zero or one times).

use super::effect::{Effect, FlowEventKind};
use super::reply;
use super::state::{DialogueState, SupportStep, TurnContext, Urgency};
use crate::intent::{classify, normalize, Classification, Intent};

/// Inputs that jump to the menu from any state
const GLOBAL_COMMANDS: &[&str] = &["menu", "start"];

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: DialogueState,
    pub effects: Vec<Effect>,
    pub reply: &'static str,
    /// Set when free text went through the classifier
    pub classification: Option<Classification>,
}

impl TransitionResult {
    pub fn new(state: DialogueState, reply: &'static str) -> Self {
        Self {
            new_state: state,
            effects: vec![],
            reply,
            classification: None,
        }
    }

    /// Keep the current state and write nothing
    fn stay(state: &DialogueState, reply: &'static str) -> Self {
        Self::new(state.clone(), reply)
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    /// Whether the transition writes the sender's state
    pub fn persists_state(&self) -> bool {
        self.effects.contains(&Effect::PersistState)
    }
}

/// Decide the reply and next state for one inbound message.
pub fn transition(state: &DialogueState, ctx: &TurnContext, text: &str) -> TransitionResult {
    let command = normalize(text);

    // Global commands win over any active flow
    if GLOBAL_COMMANDS.contains(&command.as_str()) {
        return TransitionResult::new(DialogueState::Menu, reply::MENU)
            .with_effect(Effect::PersistState);
    }

    match state {
        DialogueState::Menu => menu_choice(state, ctx, &command),

        DialogueState::Support {
            ticket_id,
            step: SupportStep::Description,
        } => TransitionResult::new(
            DialogueState::support(ticket_id.clone(), SupportStep::Urgency),
            reply::URGENCY_PROMPT,
        )
        .with_effect(Effect::SetTicketDescription {
            ticket_id: ticket_id.clone(),
            description: text.to_string(),
        })
        .with_effect(Effect::log(FlowEventKind::SupportDescription))
        .with_effect(Effect::PersistState),

        DialogueState::Support {
            ticket_id,
            step: SupportStep::Urgency,
        } => match Urgency::parse(text) {
            Some(urgency) => TransitionResult::new(DialogueState::NoFlow, reply::TICKET_CONFIRMED)
                .with_effect(Effect::SetTicketUrgency {
                    ticket_id: ticket_id.clone(),
                    urgency,
                })
                .with_effect(Effect::log_with_value(
                    FlowEventKind::SupportUrgency,
                    urgency.as_str(),
                ))
                .with_effect(Effect::log(FlowEventKind::SupportDone))
                .with_effect(Effect::PersistState),
            None => TransitionResult::stay(state, reply::URGENCY_REPROMPT),
        },

        DialogueState::NoFlow => free_text(state, ctx, text),
    }
}

fn menu_choice(state: &DialogueState, ctx: &TurnContext, command: &str) -> TransitionResult {
    match command {
        "1" => TransitionResult::new(DialogueState::NoFlow, reply::PRICING)
            .with_effect(Effect::PersistState),
        "2" => start_support(ctx),
        "3" => TransitionResult::new(DialogueState::NoFlow, reply::HUMAN_HANDOFF)
            .with_effect(Effect::PersistState),
        _ => TransitionResult::stay(state, reply::MENU_REPROMPT),
    }
}

fn start_support(ctx: &TurnContext) -> TransitionResult {
    let ticket_id = ctx.fresh_ticket_id.clone();
    TransitionResult::new(
        DialogueState::support(ticket_id.clone(), SupportStep::Description),
        reply::SUPPORT_PROMPT,
    )
    .with_effect(Effect::CreateTicket { ticket_id })
    .with_effect(Effect::log(FlowEventKind::SupportStart))
    .with_effect(Effect::PersistState)
}

fn free_text(state: &DialogueState, ctx: &TurnContext, text: &str) -> TransitionResult {
    let classification = classify(text);

    let result = match classification.accepted() {
        Some(Intent::Greeting) => TransitionResult::stay(state, reply::GREETING),
        Some(Intent::Services) => TransitionResult::stay(state, reply::SERVICES),
        Some(Intent::Pricing) => TransitionResult::stay(state, reply::PRICING),
        Some(Intent::Support) => start_support(ctx),
        Some(Intent::Human) => TransitionResult::stay(state, reply::HUMAN_HANDOFF),
        None => TransitionResult::stay(state, reply::FALLBACK)
            .with_effect(Effect::log_with_value(FlowEventKind::UnknownMessage, text)),
    };

    result.with_classification(classification)
}
