//! Conversation state types

use serde::{Deserialize, Serialize};

/// Where the turn lifecycle currently stands
///
/// `AwaitingResponse` holds iff exactly one backend request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConvState {
    /// Ready for the next user turn
    #[default]
    AwaitingInput,

    /// User turn submitted, backend request in flight
    AwaitingResponse,

    /// Backend signalled the end of the interview (terminal)
    Concluded,
}

impl ConvState {
    /// Check if this is a terminal state
    pub fn is_terminal(self) -> bool {
        matches!(self, ConvState::Concluded)
    }

    /// Whether the submit control should accept input in this state
    pub fn accepts_input(self) -> bool {
        matches!(self, ConvState::AwaitingInput)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConvState::AwaitingInput => "awaiting_input",
            ConvState::AwaitingResponse => "awaiting_response",
            ConvState::Concluded => "concluded",
        }
    }
}

/// Which page is hosting the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostKind {
    /// Standalone chat page backed by server-side session state
    Standalone,
    /// Question embedded in a survey platform
    Survey,
}

impl HostKind {
    pub fn as_str(self) -> &'static str {
        match self {
            HostKind::Standalone => "standalone",
            HostKind::Survey => "survey",
        }
    }
}

/// Labels shown on the submit control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlLabels {
    pub ready: String,
    pub waiting: String,
    pub concluded: String,
}

impl Default for ControlLabels {
    fn default() -> Self {
        Self {
            ready: "Submit response".to_string(),
            waiting: "Waiting for reply...".to_string(),
            concluded: "End of interview".to_string(),
        }
    }
}

/// Shown in place of the pending turn when a request fails
pub const DEFAULT_ERROR_MESSAGE: &str =
    "Something went wrong... Please try to submit your previous answer again.";

/// Context for a conversation (immutable configuration)
#[derive(Debug, Clone)]
pub struct ConvContext {
    /// Opaque identifier used in logs and passed to the backend by the host
    pub session_id: String,
    pub host: HostKind,
    pub labels: ControlLabels,
    /// User-facing text for any failed turn; carries no diagnostics
    pub error_message: String,
}

impl ConvContext {
    pub fn new(session_id: impl Into<String>, host: HostKind) -> Self {
        Self {
            session_id: session_id.into(),
            host,
            labels: ControlLabels::default(),
            error_message: DEFAULT_ERROR_MESSAGE.to_string(),
        }
    }
}
