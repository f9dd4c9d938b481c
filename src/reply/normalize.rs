//! Response envelope normalization
//!
//! The backend does not wrap its answer the same way in every deployment.
//! Accepted shapes, in order of precedence:
//!
//! 1. a JSON string whose contents decode to `{"message": ...}`
//! 2. `{"body": "<json>"}` or `{"body": {"message": ...}}`
//! 3. `{"message": ...}`

use serde_json::Value;
use thiserror::Error;

/// The payload could not be reduced to a message string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    #[error("{location} is not valid JSON: {reason}")]
    InvalidJson {
        location: &'static str,
        reason: String,
    },
    #[error("no string `message` field at {location}")]
    MissingMessage { location: &'static str },
    #[error("unsupported payload type: {kind}")]
    UnsupportedPayload { kind: &'static str },
}

/// Extract the trimmed assistant message from a raw payload.
pub fn extract_message(payload: &Value) -> Result<String, NormalizationError> {
    match payload {
        Value::String(encoded) => {
            let decoded = decode(encoded, "string payload")?;
            message_field(&decoded, "decoded string payload")
        }
        Value::Object(fields) => match fields.get("body") {
            Some(Value::String(encoded)) => {
                let decoded = decode(encoded, "`body` string")?;
                message_field(&decoded, "decoded `body`")
            }
            Some(body @ Value::Object(_)) => message_field(body, "`body`"),
            // A body of any other type carries nothing we can use
            _ => message_field(payload, "top level"),
        },
        other => Err(NormalizationError::UnsupportedPayload {
            kind: json_kind(other),
        }),
    }
}

fn decode(encoded: &str, location: &'static str) -> Result<Value, NormalizationError> {
    serde_json::from_str(encoded).map_err(|e| NormalizationError::InvalidJson {
        location,
        reason: e.to_string(),
    })
}

fn message_field(value: &Value, location: &'static str) -> Result<String, NormalizationError> {
    value
        .get("message")
        .and_then(Value::as_str)
        .map(|message| message.trim().to_string())
        .ok_or(NormalizationError::MissingMessage { location })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
