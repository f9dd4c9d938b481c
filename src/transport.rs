//! Backend transport
//!
//! One POST per user turn, a fixed timeout, and no retry policy. The
//! transport hands back the decoded JSON payload untouched; making sense of
//! it is the job of [`crate::reply`].

mod error;
mod http;

pub use error::{TransportError, TransportErrorKind};
pub use http::{HttpTransport, DEFAULT_TIMEOUT};

use crate::runtime::Transport;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Logging wrapper for transports
pub struct LoggingTransport {
    inner: Arc<dyn Transport>,
}

impl LoggingTransport {
    pub fn new(inner: Arc<dyn Transport>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Transport for LoggingTransport {
    async fn send(&self, body: &Value) -> Result<Value, TransportError> {
        let start = std::time::Instant::now();
        let result = self.inner.send(body).await;
        let duration = start.elapsed();

        match &result {
            Ok(_) => {
                tracing::info!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    "Backend request completed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %self.inner.endpoint(),
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    status = ?e.status,
                    error = %e.message,
                    "Backend request failed"
                );
            }
        }

        result
    }

    fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }
}
