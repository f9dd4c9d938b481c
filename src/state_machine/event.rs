//! Events that can occur in a conversation

use crate::reply::{NormalizationError, Reply};
use crate::transport::TransportError;
use thiserror::Error;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    // User events
    UserSubmit {
        text: String,
    },

    // Backend events
    ReplyReceived {
        reply: Reply,
    },
    RequestFailed {
        error: TurnError,
    },
}

/// Why a turn produced no usable reply
///
/// Both variants take the same recovery path; the distinction is kept for logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("transport: {0}")]
    Transport(#[from] TransportError),
    #[error("normalization: {0}")]
    Normalization(#[from] NormalizationError),
}

impl TurnError {
    pub fn kind(&self) -> &'static str {
        match self {
            TurnError::Transport(_) => "transport",
            TurnError::Normalization(_) => "normalization",
        }
    }
}
