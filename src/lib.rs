//! Single-turn chat widget and the chat API it talks to.
//!
//! The widget captures user input, renders messages, and forwards one message
//! per submission to `POST /api/chat`, replacing a `"Thinking..."` placeholder
//! with the reply or a generic failure message.
//!
//! # Architecture
//!
//! - **Widget**: host-agnostic chat component (message list, input, submission)
//! - **Transport**: `reqwest` client for the `/api/chat` wire contract
//! - **Terminal host**: drives the widget from stdin and renders to stdout
//! - **Server**: Axum server exposing `/api/chat` backed by an LLM provider
//!
//! # Modules
//!
//! - [`widget`]: `ChatWidget`, transcript and input components
//! - [`client`]: `ChatTransport` trait and HTTP implementation
//! - [`types`]: wire payloads shared by client and server
//! - [`llm`]: LLM backend used by the server
//! - [`terminal`]: terminal host for the widget

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod client;
pub mod config;
pub mod error;
pub mod llm;
pub mod server;
pub mod terminal;
pub mod types;
pub mod widget;

use crate::config::AppConfig;

use llm::ChatBackend;
use std::sync::Arc;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Model backend answering chat requests.
    pub backend: Arc<dyn ChatBackend>,
    /// Global Configuration
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
