//! `OpenAI`-compatible Chat Completions backend.
//!
//! Sends a non-streaming request to the provider's `chat/completions`
//! endpoint and returns the first choice's text.

use anyhow::Context;
use serde_json::{Value, json};
use tracing::debug;

use crate::types::{ChatMessage, Role};

use super::{ChatBackend, LlmSettings};

/// Backend for `OpenAI`-compatible Chat Completions APIs.
#[derive(Clone)]
pub struct ChatCompletionsBackend {
    http: reqwest::Client,
    settings: LlmSettings,
}

impl std::fmt::Debug for ChatCompletionsBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatCompletionsBackend")
            .field("settings", &self.settings)
            .finish()
    }
}

impl ChatCompletionsBackend {
    /// Create a new backend with the given settings.
    #[must_use]
    pub fn new(settings: LlmSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    /// Build the request body for `messages`.
    fn request_body(&self, messages: &[ChatMessage]) -> Value {
        let mut wire = Vec::with_capacity(messages.len() + 1);
        if let Some(prompt) = &self.settings.system_prompt {
            wire.push(json!({ "role": "system", "content": prompt }));
        }
        wire.extend(messages.iter().map(|m| {
            let role = match m.role {
                Role::User => "user",
                Role::Model => "assistant",
            };
            json!({ "role": role, "content": m.text })
        }));

        json!({
            "model": self.settings.model,
            "stream": false,
            "messages": wire,
        })
    }
}

/// Pull the assistant text out of a Chat Completions response.
fn extract_content(body: &Value) -> Option<String> {
    body["choices"][0]["message"]["content"]
        .as_str()
        .map(ToString::to_string)
}

#[async_trait::async_trait]
impl ChatBackend for ChatCompletionsBackend {
    async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<String> {
        let url = self.settings.provider.build_chat_url(&self.settings.base_url);

        let mut rb = self.http.post(&url).json(&self.request_body(messages));
        if let Some(k) = &self.settings.api_key {
            rb = rb.bearer_auth(k);
        }

        let resp = rb.send().await?.error_for_status()?;
        let body: Value = resp.json().await?;
        debug!(model = %self.settings.model, "Chat completion received");

        extract_content(&body).context("Chat completion response had no message content")
    }
}
