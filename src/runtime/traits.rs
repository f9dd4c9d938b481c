//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::state_machine::HostKind;
use crate::transport::TransportError;
use crate::view::ViewError;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Rendering surface for the conversation
pub trait ChatView: Send + Sync {
    /// Append a user turn and scroll to it
    fn render_user_turn(&self, text: &str);

    /// Append the pending placeholder; fails if one is already shown
    fn render_pending_turn(&self) -> Result<(), ViewError>;

    /// Replace the pending placeholder with `text`, or append an assistant turn
    fn resolve_pending_turn(&self, text: &str);

    /// Enable or disable the submit control and set its label
    fn set_control(&self, enabled: bool, label: &str);
}

/// Client for the dialogue backend
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request body and return the decoded response payload
    async fn send(&self, body: &Value) -> Result<Value, TransportError>;

    /// Where requests go, for logs
    fn endpoint(&self) -> &str;
}

/// The page embedding the conversation
pub trait Host: Send + Sync {
    fn kind(&self) -> HostKind;

    /// Request body for one user message, including any host-specific parameters
    fn request_body(&self, message: &str) -> Value;

    /// One-way notification that the interview has concluded
    fn interview_concluded(&self);
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

impl<T: ChatView + ?Sized> ChatView for Arc<T> {
    fn render_user_turn(&self, text: &str) {
        (**self).render_user_turn(text);
    }

    fn render_pending_turn(&self) -> Result<(), ViewError> {
        (**self).render_pending_turn()
    }

    fn resolve_pending_turn(&self, text: &str) {
        (**self).resolve_pending_turn(text);
    }

    fn set_control(&self, enabled: bool, label: &str) {
        (**self).set_control(enabled, label);
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, body: &Value) -> Result<Value, TransportError> {
        (**self).send(body).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

impl<T: Host + ?Sized> Host for Arc<T> {
    fn kind(&self) -> HostKind {
        (**self).kind()
    }

    fn request_body(&self, message: &str) -> Value {
        (**self).request_body(message)
    }

    fn interview_concluded(&self) {
        (**self).interview_concluded();
    }
}
