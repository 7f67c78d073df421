//! Property-based tests for the dialogue state machine

use super::*;
use crate::intent::normalize;
use proptest::prelude::*;

fn test_context() -> TurnContext {
    TurnContext::new("fresh-ticket")
}

fn arb_step() -> impl Strategy<Value = SupportStep> {
    prop_oneof![Just(SupportStep::Description), Just(SupportStep::Urgency)]
}

fn arb_state() -> impl Strategy<Value = DialogueState> {
    prop_oneof![
        Just(DialogueState::NoFlow),
        Just(DialogueState::Menu),
        ("[a-z0-9]{8}", arb_step()).prop_map(|(id, step)| DialogueState::support(id, step)),
    ]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Záéíóúç0-9 ,.!?]{0,30}",
        Just("1".to_string()),
        Just("2".to_string()),
        Just("3".to_string()),
        Just("alta".to_string()),
        Just("Média".to_string()),
        Just("suporte".to_string()),
        Just("oi".to_string()),
    ]
}

fn is_global_command(text: &str) -> bool {
    matches!(normalize(text).as_str(), "menu" | "start")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn prop_menu_resets_from_any_state(
        state in arb_state(),
        command in prop_oneof![Just("menu"), Just("MENU"), Just(" Menu. "), Just("start")],
    ) {
        let result = transition(&state, &test_context(), command);
        prop_assert_eq!(result.new_state, DialogueState::Menu);
        prop_assert_eq!(result.reply, reply::MENU);
        prop_assert_eq!(result.effects, vec![Effect::PersistState]);
    }

    #[test]
    fn prop_state_written_at_most_once(state in arb_state(), text in arb_text()) {
        let result = transition(&state, &test_context(), &text);
        let writes = result
            .effects
            .iter()
            .filter(|e| matches!(e, Effect::PersistState))
            .count();
        prop_assert!(writes <= 1);
        prop_assert!(!result.reply.is_empty());
        if writes == 0 {
            prop_assert_eq!(result.new_state, state);
        }
    }

    #[test]
    fn prop_menu_self_loops_on_other_input(text in arb_text()) {
        let choice = normalize(&text);
        prop_assume!(!matches!(choice.as_str(), "1" | "2" | "3" | "menu" | "start"));

        let result = transition(&DialogueState::Menu, &test_context(), &text);
        prop_assert_eq!(result.new_state, DialogueState::Menu);
        prop_assert_eq!(result.reply, reply::MENU_REPROMPT);
        prop_assert!(result.effects.is_empty());
    }

    #[test]
    fn prop_invalid_urgency_leaves_state(id in "[a-z0-9]{8}", text in arb_text()) {
        prop_assume!(Urgency::parse(&text).is_none() && !is_global_command(&text));

        let state = DialogueState::support(id, SupportStep::Urgency);
        let result = transition(&state, &test_context(), &text);
        prop_assert_eq!(result.new_state, state);
        prop_assert_eq!(result.reply, reply::URGENCY_REPROMPT);
        prop_assert!(result.effects.is_empty());
    }

    // Entering the support flow always opens the ticket the state points at
    #[test]
    fn prop_support_entry_creates_referenced_ticket(
        texts in proptest::collection::vec(arb_text(), 0..15),
    ) {
        let ctx = test_context();
        let mut state = DialogueState::NoFlow;

        for text in texts {
            let was_support = matches!(state, DialogueState::Support { .. });
            let result = transition(&state, &ctx, &text);

            if let DialogueState::Support { ticket_id, step: SupportStep::Description } =
                &result.new_state
            {
                if !was_support {
                    let opened = Effect::CreateTicket { ticket_id: ticket_id.clone() };
                    prop_assert!(result.effects.contains(&opened));
                }
            }

            // Ticket writes only ever target the ticket held in the prior state
            for effect in &result.effects {
                match effect {
                    Effect::SetTicketDescription { ticket_id, .. }
                    | Effect::SetTicketUrgency { ticket_id, .. } => {
                        prop_assert_eq!(Some(ticket_id.as_str()), state.ticket_id());
                    }
                    _ => {}
                }
            }

            state = result.new_state;
        }
    }

    #[test]
    fn prop_unknown_event_only_without_flow(state in arb_state(), text in arb_text()) {
        let result = transition(&state, &test_context(), &text);
        let logged_unknown = result.effects.iter().any(|e| matches!(
            e,
            Effect::LogEvent { event: FlowEventKind::UnknownMessage, .. }
        ));
        if logged_unknown {
            prop_assert_eq!(state, DialogueState::NoFlow);
            prop_assert_eq!(result.reply, reply::FALLBACK);
        }
    }
}
