//! HTTP transport over reqwest

use super::TransportError;
use crate::runtime::Transport;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// Requests that take longer than this are abandoned
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// JSON-over-HTTP transport to the interview backend
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, body: &Value) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError::timeout(format!("Request timeout: {e}"))
                } else {
                    TransportError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::timeout(format!("Response timeout: {e}"))
            } else {
                TransportError::network(format!("Failed to read response: {e}"))
            }
        })?;

        if !status.is_success() {
            return Err(TransportError::status(
                status.as_u16(),
                format!("HTTP {status}: {text}"),
            ));
        }

        serde_json::from_str(&text)
            .map_err(|e| TransportError::decode(format!("Response is not JSON: {e} - body: {text}")))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
