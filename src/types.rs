//! Wire types for the `/api/chat` endpoint.
//!
//! These types are shared by the widget (which sends them) and the server
//! (which receives them), so both halves agree on the JSON shape.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Author of a message on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person typing into the widget.
    User,
    /// The model's side of the conversation.
    #[serde(alias = "assistant")]
    Model,
}

/// A single message in a [`ChatRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,
    /// The message text.
    pub text: String,
}

impl ChatMessage {
    /// Create a user message.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Conversation messages. The widget always sends exactly one.
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Build a request carrying only the just-typed message.
    #[must_use]
    pub fn single_turn(text: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::user(text)],
        }
    }
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The model's reply, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl ChatResponse {
    /// Read a response from any JSON body.
    ///
    /// A falsy `result` (missing, `null`, `false`, `0`, `""`) or a body that
    /// is not an object yields no result. Other non-string values are kept
    /// as their JSON text.
    #[must_use]
    pub fn from_json(body: &Value) -> Self {
        let result = match body.get("result") {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Bool(true)) => Some("true".to_string()),
            Some(Value::Number(n)) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
            Some(v @ (Value::Array(_) | Value::Object(_))) => Some(v.to_string()),
            _ => None,
        };
        Self { result }
    }

    /// The reply text, if present and non-empty.
    #[must_use]
    pub fn reply(&self) -> Option<&str> {
        self.result.as_deref().filter(|s| !s.is_empty())
    }
}
