//! Conversation termination detection

use serde::{Deserialize, Serialize};

/// Marker the backend appends to its final message
pub const END_SENTINEL: &str = "---END---";

/// A normalized assistant message, classified by finality
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Reply {
    /// The interview continues after this message
    Ongoing(String),
    /// Final message; the sentinel has already been stripped
    Concluded(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Ongoing(text) | Reply::Concluded(text) => text,
        }
    }

    pub fn is_concluded(&self) -> bool {
        matches!(self, Reply::Concluded(_))
    }
}

/// Classify a normalized message, removing the first sentinel if present.
pub fn classify(message: String) -> Reply {
    let Some((before, after)) = message.split_once(END_SENTINEL) else {
        return Reply::Ongoing(message);
    };

    let (before, after) = (before.trim_end(), after.trim_start());
    let joined = if before.is_empty() || after.is_empty() {
        format!("{before}{after}")
    } else {
        format!("{before} {after}")
    };
    Reply::Concluded(joined.trim().to_string())
}
