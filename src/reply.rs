//! Assistant reply decoding
//!
//! Turns whatever the backend sent into a typed [`Reply`], so nothing past
//! this point ever looks at the raw envelope or the sentinel again.

mod normalize;
mod termination;

pub use normalize::{extract_message, NormalizationError};
pub use termination::{classify, Reply};

use serde_json::Value;

/// Normalize a raw payload and classify the resulting message.
pub fn interpret(payload: &Value) -> Result<Reply, NormalizationError> {
    extract_message(payload).map(classify)
}
