//! Standalone chat page
//!
//! The backend keeps the interview state server-side, keyed by session id,
//! so each request carries only the message and that id.

use crate::runtime::Host;
use crate::state_machine::HostKind;
use serde_json::{json, Value};

pub struct StandaloneHost {
    session_id: String,
}

impl StandaloneHost {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
        }
    }
}

impl Host for StandaloneHost {
    fn kind(&self) -> HostKind {
        HostKind::Standalone
    }

    fn request_body(&self, message: &str) -> Value {
        json!({
            "user_message": message,
            "session_id": self.session_id,
        })
    }

    fn interview_concluded(&self) {
        // The page has nothing to record; the server already knows
        tracing::debug!(session_id = %self.session_id, "Standalone interview concluded");
    }
}
