//! Backend access to the language model.
//!
//! The `/api/chat` handler only depends on the [`ChatBackend`] trait. The
//! shipped implementation, [`ChatCompletionsBackend`], talks to any
//! `OpenAI`-compatible Chat Completions endpoint, including Gemini's.
//!
//! # Example
//!
//! ```rust,ignore
//! use chatbot_widget::llm::{ChatCompletionsBackend, LlmSettings, Provider};
//!
//! let base_url = "https://generativelanguage.googleapis.com/v1beta/openai";
//! let settings = LlmSettings {
//!     base_url: base_url.to_string(),
//!     api_key: Some("...".to_string()),
//!     model: "gemini-2.5-flash".to_string(),
//!     provider: Provider::detect_from_url(base_url),
//!     system_prompt: None,
//! };
//! let backend = ChatCompletionsBackend::new(settings);
//! ```

pub mod chat_completions;
pub mod provider;

pub use chat_completions::ChatCompletionsBackend;
pub use provider::Provider;

use crate::types::ChatMessage;

/// LLM connection and model settings.
#[derive(Clone)]
pub struct LlmSettings {
    /// Base URL for the LLM API (e.g., `https://api.openai.com`).
    pub base_url: String,
    /// Optional API key for authentication.
    pub api_key: Option<String>,
    /// Model identifier (e.g., `gemini-2.5-flash`).
    pub model: String,
    /// Provider type (auto-detected from `base_url`).
    pub provider: Provider,
    /// Optional system prompt prepended to every request.
    pub system_prompt: Option<String>,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("provider", &self.provider)
            .field("system_prompt", &self.system_prompt)
            .finish()
    }
}

/// Something that turns a list of chat messages into a reply.
#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Generate a reply for `messages`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be reached or answers with
    /// something that has no text.
    async fn complete(&self, messages: &[ChatMessage]) -> anyhow::Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let settings = LlmSettings {
            base_url: "https://api.openai.com".to_string(),
            api_key: Some("sk-secret".to_string()),
            model: "gpt-4o-mini".to_string(),
            provider: Provider::Generic,
            system_prompt: None,
        };
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
