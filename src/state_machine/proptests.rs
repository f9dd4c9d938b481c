//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible event sequences.

use super::transition::*;
use super::*;
use crate::reply::{NormalizationError, Reply};
use crate::transport::TransportError;
use crate::view::Transcript;
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn test_context() -> ConvContext {
    ConvContext::new("test-session", HostKind::Survey)
}

/// Everything the effects have touched so far
#[derive(Default)]
struct World {
    transcript: Transcript,
    in_flight: usize,
    notifications: usize,
}

impl World {
    fn started(context: &ConvContext) -> Self {
        let mut world = Self::default();
        world.transcript.resolve_pending("First question?");
        world.transcript.set_control(true, &context.labels.ready);
        world
    }

    fn apply(&mut self, effects: &[Effect]) -> Result<(), String> {
        for effect in effects {
            match effect {
                Effect::SetControl { enabled, label } => {
                    self.transcript.set_control(*enabled, label);
                }
                Effect::RenderUserTurn { text } => self.transcript.push_user(text),
                Effect::RenderPendingTurn => {
                    self.transcript.push_pending().map_err(|e| e.to_string())?;
                }
                Effect::ResolvePendingTurn { text } => self.transcript.resolve_pending(text),
                Effect::DispatchRequest { .. } => self.in_flight += 1,
                Effect::NotifyConcluded => self.notifications += 1,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_submit() -> impl Strategy<Value = Event> {
    prop_oneof![
        "[ \t\n]{0,5}".prop_map(|text| Event::UserSubmit { text }),
        "[ ]{0,2}[a-zA-Z?!',.]{1,20}[ ]{0,2}".prop_map(|text| Event::UserSubmit { text }),
    ]
}

fn arb_reply() -> impl Strategy<Value = Reply> {
    prop_oneof![
        3 => "[a-zA-Z ?]{0,30}".prop_map(Reply::Ongoing),
        1 => "[a-zA-Z ?]{0,30}".prop_map(Reply::Concluded),
    ]
}

fn arb_turn_error() -> impl Strategy<Value = TurnError> {
    prop_oneof![
        Just(TurnError::from(TransportError::timeout("timeout"))),
        Just(TurnError::from(TransportError::status(502, "bad gateway"))),
        Just(TurnError::from(NormalizationError::MissingMessage {
            location: "top level"
        })),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        3 => arb_submit(),
        2 => arb_reply().prop_map(|reply| Event::ReplyReceived { reply }),
        1 => arb_turn_error().prop_map(|error| Event::RequestFailed { error }),
    ]
}

fn arb_state() -> impl Strategy<Value = ConvState> {
    prop_oneof![
        Just(ConvState::AwaitingInput),
        Just(ConvState::AwaitingResponse),
        Just(ConvState::Concluded),
    ]
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Pending count, request accounting, control state and notification
    /// count stay consistent across any event sequence
    #[test]
    fn prop_lifecycle_invariants(events in proptest::collection::vec(arb_event(), 0..40)) {
        let ctx = test_context();
        let mut state = ConvState::AwaitingInput;
        let mut world = World::started(&ctx);

        for event in events {
            let completes = matches!(
                event,
                Event::ReplyReceived { .. } | Event::RequestFailed { .. }
            );
            let Ok(result) = transition(&state, &ctx, event) else {
                continue;
            };

            if completes {
                world.in_flight -= 1;
            }
            prop_assert!(world.apply(&result.effects).is_ok());
            state = result.new_state;

            prop_assert!(world.transcript.pending_count() <= 1);
            prop_assert_eq!(world.transcript.has_pending(), world.transcript.pending_count() == 1);
            prop_assert!(world.in_flight <= 1);
            prop_assert_eq!(state == ConvState::AwaitingResponse, world.in_flight == 1);
            prop_assert_eq!(state == ConvState::AwaitingResponse, world.transcript.has_pending());
            prop_assert_eq!(world.transcript.control().enabled, state.accepts_input());
            prop_assert!(world.notifications <= 1);
            prop_assert_eq!(world.notifications == 1, state == ConvState::Concluded);
        }
    }

    /// Whitespace-only submissions never change anything
    #[test]
    fn prop_blank_submission_is_noop(text in "[ \t\r\n]{0,10}") {
        let result = transition(&ConvState::AwaitingInput, &test_context(), Event::UserSubmit { text })
            .unwrap();
        prop_assert_eq!(result.new_state, ConvState::AwaitingInput);
        prop_assert!(result.effects.is_empty());
    }

    /// Nothing leaves Concluded
    #[test]
    fn prop_concluded_is_absorbing(event in arb_event()) {
        prop_assert!(transition(&ConvState::Concluded, &test_context(), event).is_err());
    }

    /// A dispatch is always preceded by exactly one placeholder and one user turn
    #[test]
    fn prop_dispatch_paired_with_render(state in arb_state(), event in arb_submit()) {
        if let Ok(result) = transition(&state, &test_context(), event) {
            let dispatches = result.effects.iter()
                .filter(|e| matches!(e, Effect::DispatchRequest { .. }))
                .count();
            let pendings = result.effects.iter()
                .filter(|e| matches!(e, Effect::RenderPendingTurn))
                .count();
            let users = result.effects.iter()
                .filter(|e| matches!(e, Effect::RenderUserTurn { .. }))
                .count();
            prop_assert!(dispatches <= 1);
            prop_assert_eq!(dispatches, pendings);
            prop_assert_eq!(dispatches, users);
        }
    }

    /// Every accepted completion resolves the placeholder exactly once
    #[test]
    fn prop_completion_resolves_once(event in arb_event()) {
        let is_completion = matches!(
            event,
            Event::ReplyReceived { .. } | Event::RequestFailed { .. }
        );
        if let Ok(result) = transition(&ConvState::AwaitingResponse, &test_context(), event) {
            let resolves = result.effects.iter()
                .filter(|e| matches!(e, Effect::ResolvePendingTurn { .. }))
                .count();
            prop_assert!(is_completion);
            prop_assert_eq!(resolves, 1);
        }
    }
}
