//! Pure state transition function

use super::{ConvContext, ConvState, Effect, Event};
use crate::reply::Reply;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("A reply is still pending, cannot accept another message")]
    AwaitingResponse,
    #[error("The interview has concluded")]
    Concluded,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(
    state: &ConvState,
    context: &ConvContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // User submission
        // ============================================================

        // Blank input is a no-op, not an error
        (ConvState::AwaitingInput, Event::UserSubmit { text }) if text.trim().is_empty() => {
            Ok(TransitionResult::new(ConvState::AwaitingInput))
        }

        (ConvState::AwaitingInput, Event::UserSubmit { text }) => {
            let text = text.trim().to_string();
            Ok(TransitionResult::new(ConvState::AwaitingResponse)
                .with_effect(Effect::disable_control(&context.labels.waiting))
                .with_effect(Effect::RenderUserTurn { text: text.clone() })
                .with_effect(Effect::RenderPendingTurn)
                .with_effect(Effect::DispatchRequest { message: text }))
        }

        (ConvState::AwaitingResponse, Event::UserSubmit { .. }) => {
            Err(TransitionError::AwaitingResponse)
        }

        (ConvState::Concluded, Event::UserSubmit { .. }) => Err(TransitionError::Concluded),

        // ============================================================
        // Backend completion
        // ============================================================
        (ConvState::AwaitingResponse, Event::ReplyReceived { reply: Reply::Ongoing(text) }) => {
            Ok(TransitionResult::new(ConvState::AwaitingInput)
                .with_effect(Effect::resolve_pending(text))
                .with_effect(Effect::enable_control(&context.labels.ready)))
        }

        (ConvState::AwaitingResponse, Event::ReplyReceived { reply: Reply::Concluded(text) }) => {
            Ok(TransitionResult::new(ConvState::Concluded)
                .with_effect(Effect::resolve_pending(text))
                .with_effect(Effect::disable_control(&context.labels.concluded))
                .with_effect(Effect::NotifyConcluded))
        }

        // The failed turn's user message stays rendered and is not replayed
        (ConvState::AwaitingResponse, Event::RequestFailed { .. }) => {
            Ok(TransitionResult::new(ConvState::AwaitingInput)
                .with_effect(Effect::resolve_pending(context.error_message.clone()))
                .with_effect(Effect::enable_control(&context.labels.ready)))
        }

        (state, event @ (Event::ReplyReceived { .. } | Event::RequestFailed { .. })) => {
            Err(TransitionError::InvalidTransition(format!(
                "{event:?} while {}",
                state.as_str()
            )))
        }
    }
}
