//! Runtime for executing a conversation
//!
//! Owns the [`ConvState`], applies transition effects to the view, and runs
//! the single in-flight backend request of each turn as a background task.

mod executor;
pub mod traits;


pub use executor::ConversationRuntime;
pub use traits::*;

use crate::state_machine::{ConvContext, ConvState, Event};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Handle to interact with a running conversation
pub struct ConversationHandle {
    pub event_tx: mpsc::Sender<Event>,
    pub state_rx: watch::Receiver<ConvState>,
    pub task: JoinHandle<()>,
}

impl ConversationHandle {
    /// Current lifecycle state as last published by the runtime
    pub fn state(&self) -> ConvState {
        *self.state_rx.borrow()
    }
}

/// Spawn a runtime for one conversation, seeded with the host's first turn.
pub fn start<V, T, H>(
    context: ConvContext,
    seed: impl Into<String>,
    view: V,
    transport: T,
    host: H,
) -> ConversationHandle
where
    V: ChatView + 'static,
    T: Transport + 'static,
    H: Host + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(32);
    let (state_tx, state_rx) = watch::channel(ConvState::AwaitingInput);

    let session_id = context.session_id.clone();
    let runtime = ConversationRuntime::new(
        context,
        seed.into(),
        view,
        transport,
        host,
        event_rx,
        event_tx.downgrade(),
        state_tx,
    );

    let task = tokio::spawn(async move {
        runtime.run().await;
        tracing::info!(session_id = %session_id, "Conversation runtime finished");
    });

    ConversationHandle {
        event_tx,
        state_rx,
        task,
    }
}
