//! The chat widget.
//!
//! [`ChatWidget`] owns the three components a chat form needs: an input
//! field, a message list and the submission entry point. A submission
//! appends the user's message and a `"Thinking..."` placeholder right away,
//! then hands back an [`Exchange`] that performs the request and overwrites
//! the placeholder exactly once.
//!
//! # Architecture
//!
//! - [`Transcript`]: the append-only message list
//! - [`MessageHandle`]: a single-use handle for replacing a message's text
//! - [`InputField`] / [`InputBuffer`]: the text input
//! - [`Exchange`]: one in-flight request and its placeholder
//!
//! # Example
//!
//! ```rust,no_run
//! use chatbot_widget::client::HttpTransport;
//! use chatbot_widget::widget::ChatWidget;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let widget = ChatWidget::new(HttpTransport::new("http://localhost:3000")?);
//! if let Some(exchange) = widget.submit("  Hello!  ") {
//!     tokio::spawn(exchange.settle());
//! }
//! # Ok(())
//! # }
//! ```

mod input;
mod transcript;

pub use input::{InputBuffer, InputField};
pub use transcript::{Message, MessageHandle, Sender, Transcript, TranscriptEvent};

use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::client::ChatTransport;
use crate::error::ErrorKind;
use crate::types::ChatRequest;

/// Placeholder shown while a request is in flight.
pub const THINKING_TEXT: &str = "Thinking...";
/// Shown when the server answered without a result.
pub const NO_RESPONSE_TEXT: &str = "Sorry, no response received.";
/// Shown for every failure.
pub const FAILURE_TEXT: &str = "Failed to get response from server.";

/// How an exchange settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The server returned a non-empty result.
    Reply(String),
    /// The server answered successfully but without a result.
    NoResult,
    /// The request failed.
    Failed(ErrorKind),
}

impl Outcome {
    /// Text the placeholder is overwritten with.
    #[must_use]
    pub fn display_text(&self) -> &str {
        match self {
            Self::Reply(text) => text,
            Self::NoResult => NO_RESPONSE_TEXT,
            Self::Failed(_) => FAILURE_TEXT,
        }
    }
}

/// Single-turn chat widget.
#[derive(Clone)]
pub struct ChatWidget {
    transport: Arc<dyn ChatTransport>,
    input: Arc<dyn InputField>,
    transcript: Transcript,
}

impl std::fmt::Debug for ChatWidget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatWidget")
            .field("messages", &self.transcript.len())
            .finish_non_exhaustive()
    }
}

impl ChatWidget {
    /// Create a widget with its own input buffer and empty transcript.
    pub fn new(transport: impl ChatTransport + 'static) -> Self {
        Self::with_input(transport, InputBuffer::new())
    }

    /// Create a widget bound to an existing input field.
    pub fn with_input(
        transport: impl ChatTransport + 'static,
        input: impl InputField + 'static,
    ) -> Self {
        Self {
            transport: Arc::new(transport),
            input: Arc::new(input),
            transcript: Transcript::new(),
        }
    }

    /// The message list.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The input field.
    pub fn input(&self) -> &dyn InputField {
        self.input.as_ref()
    }

    /// Append a message to the list and scroll it into view.
    pub fn append_message(&self, text: impl Into<String>, sender: Sender) -> MessageHandle {
        self.transcript.append(text, sender)
    }

    /// Handle a form submission using the input field's current value.
    pub fn submit_form(&self) -> Option<Exchange> {
        let value = self.input.value();
        self.submit(&value)
    }

    /// Submit `raw_text`.
    ///
    /// Returns `None` without touching the list or the network when the
    /// trimmed text is empty. Otherwise the user message and the placeholder
    /// are appended before this returns, and the returned [`Exchange`]
    /// carries the request.
    pub fn submit(&self, raw_text: &str) -> Option<Exchange> {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("Ignoring empty submission");
            return None;
        }

        let id = Uuid::new_v4();
        info!(
            name: "chat.submit",
            exchange_id = %id,
            chars = text.chars().count(),
            "Message submitted"
        );

        self.append_message(text, Sender::User);
        self.input.clear();
        let placeholder = self.append_message(THINKING_TEXT, Sender::Bot);

        Some(Exchange {
            id,
            request: ChatRequest::single_turn(text),
            placeholder,
            transport: Arc::clone(&self.transport),
            transcript: self.transcript.clone(),
        })
    }

    /// Submit `raw_text` and wait for the exchange to settle.
    pub async fn send(&self, raw_text: &str) -> Option<Outcome> {
        match self.submit(raw_text) {
            Some(exchange) => Some(exchange.settle().await),
            None => None,
        }
    }
}

/// One in-flight request and the placeholder it will resolve.
pub struct Exchange {
    id: Uuid,
    request: ChatRequest,
    placeholder: MessageHandle,
    transport: Arc<dyn ChatTransport>,
    transcript: Transcript,
}

impl std::fmt::Debug for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exchange")
            .field("id", &self.id)
            .field("request", &self.request)
            .field("placeholder", &self.placeholder.index())
            .finish_non_exhaustive()
    }
}

impl Exchange {
    /// Identifier used in logs.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The request this exchange will send.
    #[must_use]
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// Index of the placeholder message.
    #[must_use]
    pub fn placeholder_index(&self) -> usize {
        self.placeholder.index()
    }

    /// Send the request and overwrite the placeholder with the outcome.
    pub async fn settle(self) -> Outcome {
        let outcome = match self.transport.send(&self.request).await {
            Ok(response) => match response.reply() {
                Some(reply) => Outcome::Reply(reply.to_string()),
                None => Outcome::NoResult,
            },
            Err(err) => {
                warn!(
                    name: "chat.failed",
                    exchange_id = %self.id,
                    kind = ?err.kind(),
                    error = %err,
                    "Error fetching chat response"
                );
                Outcome::Failed(err.kind())
            }
        };

        let text = outcome.display_text();
        if !self.placeholder.replace_text(text) {
            self.transcript.append(text, Sender::Bot);
        }

        info!(
            name: "chat.settled",
            exchange_id = %self.id,
            outcome = ?outcome,
            "Exchange settled"
        );
        outcome
    }
}
