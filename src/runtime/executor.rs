//! Conversation runtime executor

use super::traits::{ChatView, Host, Transport};
use crate::reply::{self, Reply};
use crate::state_machine::{
    transition, ConvContext, ConvState, Effect, Event, TransitionError, TurnError,
};
use std::sync::Arc;
use tokio::sync::{mpsc, watch};

/// Generic conversation runtime that can work with any view, transport, and host
pub struct ConversationRuntime<V, T, H>
where
    V: ChatView + 'static,
    T: Transport + 'static,
    H: Host + 'static,
{
    context: ConvContext,
    state: ConvState,
    /// First assistant turn, supplied by the host page
    seed: String,
    view: V,
    transport: Arc<T>,
    host: H,
    event_rx: mpsc::Receiver<Event>,
    /// Weak so the loop ends once every outside sender and in-flight request is gone
    event_tx: mpsc::WeakSender<Event>,
    state_tx: watch::Sender<ConvState>,
}

impl<V, T, H> ConversationRuntime<V, T, H>
where
    V: ChatView + 'static,
    T: Transport + 'static,
    H: Host + 'static,
{
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        context: ConvContext,
        seed: String,
        view: V,
        transport: T,
        host: H,
        event_rx: mpsc::Receiver<Event>,
        event_tx: mpsc::WeakSender<Event>,
        state_tx: watch::Sender<ConvState>,
    ) -> Self {
        Self {
            context,
            state: ConvState::AwaitingInput,
            seed,
            view,
            transport: Arc::new(transport),
            host,
            event_rx,
            event_tx,
            state_tx,
        }
    }

    pub async fn run(mut self) {
        tracing::info!(
            session_id = %self.context.session_id,
            host = self.host.kind().as_str(),
            endpoint = %self.transport.endpoint(),
            "Starting conversation runtime"
        );

        self.view.resolve_pending_turn(&self.seed);
        self.view.set_control(self.state.accepts_input(), &self.context.labels.ready);
        self.state_tx.send_replace(self.state);

        while let Some(event) = self.event_rx.recv().await {
            match self.process_event(event) {
                Ok(()) => {}
                Err(e @ (TransitionError::AwaitingResponse | TransitionError::Concluded)) => {
                    tracing::debug!(reason = %e, "Ignoring submission");
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Dropping unexpected event");
                }
            }
        }

        tracing::info!(
            session_id = %self.context.session_id,
            state = self.state.as_str(),
            "Conversation runtime stopped"
        );
    }

    fn process_event(&mut self, event: Event) -> Result<(), TransitionError> {
        if let Event::RequestFailed { error } = &event {
            tracing::warn!(
                session_id = %self.context.session_id,
                kind = error.kind(),
                error = %error,
                "Turn failed"
            );
        }

        let result = transition(&self.state, &self.context, event)?;

        let old_state = std::mem::replace(&mut self.state, result.new_state);
        if old_state != self.state {
            tracing::info!(
                from = old_state.as_str(),
                to = self.state.as_str(),
                "Conversation state changed"
            );
        }

        for effect in result.effects {
            self.execute_effect(effect);
        }

        // Publish only after the view reflects the new state
        self.state_tx.send_replace(self.state);
        Ok(())
    }

    fn execute_effect(&mut self, effect: Effect) {
        match effect {
            Effect::SetControl { enabled, label } => {
                self.view.set_control(enabled, &label);
            }

            Effect::RenderUserTurn { text } => {
                self.view.render_user_turn(&text);
            }

            Effect::RenderPendingTurn => {
                if let Err(e) = self.view.render_pending_turn() {
                    // The transition table never asks for a second placeholder
                    tracing::error!(error = %e, "Pending turn invariant violated");
                }
            }

            Effect::ResolvePendingTurn { text } => {
                self.view.resolve_pending_turn(&text);
            }

            Effect::DispatchRequest { message } => self.dispatch(&message),

            Effect::NotifyConcluded => {
                tracing::info!(
                    session_id = %self.context.session_id,
                    host = self.host.kind().as_str(),
                    "Interview concluded"
                );
                self.host.interview_concluded();
            }
        }
    }

    /// Spawn the one backend request for this turn
    fn dispatch(&self, message: &str) {
        let Some(event_tx) = self.event_tx.upgrade() else {
            tracing::debug!("Event channel closed, not dispatching request");
            return;
        };

        let body = self.host.request_body(message);
        let transport = self.transport.clone();
        let session_id = self.context.session_id.clone();

        tokio::spawn(async move {
            tracing::debug!(session_id = %session_id, "Sending backend request");

            let outcome: Result<Reply, TurnError> = match transport.send(&body).await {
                Ok(payload) => reply::interpret(&payload).map_err(Into::into),
                Err(e) => Err(e.into()),
            };

            let event = match outcome {
                Ok(reply) => {
                    tracing::debug!(
                        session_id = %session_id,
                        concluded = reply.is_concluded(),
                        chars = reply.text().chars().count(),
                        "Reply received"
                    );
                    Event::ReplyReceived { reply }
                }
                Err(error) => Event::RequestFailed { error },
            };

            if event_tx.send(event).await.is_err() {
                tracing::debug!("Runtime gone before reply arrived");
            }
        });
    }
}
