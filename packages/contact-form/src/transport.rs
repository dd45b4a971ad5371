//! Sending a contact request to the relay.

use async_trait::async_trait;
use contact_types::{ContactRequest, RelayResponse};
use std::fmt;
use tracing::debug;

/// Why the relay did not accept a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Relay answered with a non-success status.
    Rejected { status: u16, message: String },
    /// Relay unreachable, or the connection failed mid-request.
    Network(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Rejected { status, message } => {
                write!(f, "relay rejected request ({status}): {message}")
            }
            TransportError::Network(msg) => write!(f, "network error: {msg}"),
        }
    }
}

impl std::error::Error for TransportError {}

/// One outbound call per invocation; implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &ContactRequest) -> Result<(), TransportError>;
}

/// JSON POST to the relay endpoint.
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ContactRequest) -> Result<(), TransportError> {
        let resp = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            debug!(status = %status, "Relay accepted submission");
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<RelayResponse>(&body)
            .ok()
            .and_then(|r| r.error().map(str::to_string))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            });

        Err(TransportError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}
