//! HTTP transport used by the widget to reach the chat endpoint.

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::error::{ChatError, Result};
use crate::types::{ChatRequest, ChatResponse};

/// Path of the chat endpoint relative to the server base URL.
pub const CHAT_PATH: &str = "/api/chat";

/// Something that can deliver a [`ChatRequest`] and return the decoded reply.
///
/// The widget only depends on this trait, so hosts and tests can swap the
/// network for anything that produces a [`ChatResponse`].
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one request. Non-2xx statuses, network errors and undecodable
    /// bodies are all reported as errors.
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse>;
}

/// [`ChatTransport`] backed by `reqwest`.
///
/// # Example
///
/// ```rust,no_run
/// use chatbot_widget::client::{ChatTransport, HttpTransport};
/// use chatbot_widget::types::ChatRequest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = HttpTransport::new("http://localhost:3000")?;
/// let _reply = transport.send(&ChatRequest::single_turn("Hello!")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for the server at `base_url`.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a transport with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let endpoint = Url::parse(base_url.as_ref())?.join(CHAT_PATH)?;
        Ok(Self { endpoint, http })
    }

    /// The full URL requests are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::BadResponse {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "Chat response received");

        // Any valid JSON is accepted; only its `result` field matters.
        let value: serde_json::Value = serde_json::from_slice(&body)?;
        Ok(ChatResponse::from_json(&value))
    }
}
