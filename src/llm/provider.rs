//! Provider-specific configuration and detection.
//!
//! This module handles differences between LLM API providers, mainly the
//! URL the chat completions request is posted to.

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// Google Gemini through its `OpenAI`-compatible endpoint
    /// (`https://generativelanguage.googleapis.com/v1beta/openai`).
    Gemini,
    /// Any other OpenAI-compatible provider (`OpenAI`, Ollama, vLLM, ...).
    Generic,
}

impl Provider {
    /// Detect provider from base URL.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chatbot_widget::llm::Provider;
    ///
    /// let provider = Provider::detect_from_url("https://api.openai.com");
    /// assert_eq!(provider, Provider::Generic);
    /// ```
    #[must_use]
    pub fn detect_from_url(base_url: &str) -> Self {
        if base_url
            .to_lowercase()
            .contains("generativelanguage.googleapis.com")
        {
            Self::Gemini
        } else {
            Self::Generic
        }
    }

    /// Build the chat completions URL for this provider.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL (a trailing slash is ignored)
    #[must_use]
    pub fn build_chat_url(self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');

        match self {
            // The Gemini base already carries its versioned path.
            Self::Gemini => format!("{base}/chat/completions"),
            Self::Generic => format!("{base}/v1/chat/completions"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_gemini() {
        let provider =
            Provider::detect_from_url("https://generativelanguage.googleapis.com/v1beta/openai");
        assert_eq!(provider, Provider::Gemini);
    }

    #[test]
    fn test_detect_generic() {
        for url in [
            "http://localhost:11434",
            "https://api.openai.com",
            "https://api.groq.com/openai",
        ] {
            assert_eq!(Provider::detect_from_url(url), Provider::Generic, "{url}");
        }
    }

    #[test]
    fn test_build_url_gemini() {
        let url = Provider::Gemini
            .build_chat_url("https://generativelanguage.googleapis.com/v1beta/openai/");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
        );
    }

    #[test]
    fn test_build_url_generic() {
        let url = Provider::Generic.build_chat_url("https://api.openai.com");
        assert_eq!(url, "https://api.openai.com/v1/chat/completions");
    }
}
