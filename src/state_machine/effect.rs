//! Effects produced by state transitions

/// Effects to be executed after state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Enable or disable the submit control and relabel it
    SetControl { enabled: bool, label: String },

    /// Append the user's turn to the conversation view
    RenderUserTurn { text: String },

    /// Append the single pending placeholder
    RenderPendingTurn,

    /// Replace the pending placeholder (or append) with assistant text
    ResolvePendingTurn { text: String },

    /// Send one request to the backend for this user message
    DispatchRequest { message: String },

    /// Tell the embedding host the interview is over
    NotifyConcluded,
}

impl Effect {
    pub fn enable_control(label: &str) -> Self {
        Effect::SetControl {
            enabled: true,
            label: label.to_string(),
        }
    }

    pub fn disable_control(label: &str) -> Self {
        Effect::SetControl {
            enabled: false,
            label: label.to_string(),
        }
    }

    pub fn resolve_pending(text: impl Into<String>) -> Self {
        Effect::ResolvePendingTurn { text: text.into() }
    }
}
