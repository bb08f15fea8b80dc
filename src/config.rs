//! Command line and layered application configuration.
//!
//! Settings are read from built-in defaults, then an optional config file,
//! then `CHATBOT_`-prefixed environment variables, then CLI flags. LLM
//! connection settings come from the `LLM_*` environment variables.

use crate::llm::{LlmSettings, Provider};
use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the chat API server (default)
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// Address to bind
        #[arg(long)]
        host: Option<String>,
    },
    /// Chat with a running server from the terminal
    Chat {
        /// Base URL of the chat server
        #[arg(long, env = "CHAT_ENDPOINT")]
        endpoint: Option<String>,
    },
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub widget: WidgetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Directory served for any path not matched by an API route.
    pub public_dir: String,
    /// Per-request timeout. Zero disables it.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WidgetConfig {
    /// Base URL the terminal widget posts to.
    pub endpoint: String,
}

impl AppConfig {
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    /// Build the configuration. Priority: CLI flag > CLI env var >
    /// `CHATBOT_` env > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.public_dir", "public")?
            .set_default("server.request_timeout_secs", 60)?
            .set_default("widget.endpoint", "http://127.0.0.1:3000")?;

        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path).required(true)),
            // ./config.{yaml,toml,json} if present
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // E.g. CHATBOT_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("CHATBOT")
                .separator("__")
                .try_parsing(true),
        );

        match &cli.command {
            Some(Command::Serve { port, host }) => {
                if let Some(port) = port {
                    builder = builder.set_override("server.port", i64::from(*port))?;
                }
                if let Some(host) = host {
                    builder = builder.set_override("server.host", host.as_str())?;
                }
            }
            Some(Command::Chat { endpoint }) => {
                if let Some(endpoint) = endpoint {
                    builder = builder.set_override("widget.endpoint", endpoint.as_str())?;
                }
            }
            None => {}
        }

        builder.build()?.try_deserialize()
    }
}

pub fn load_llm_settings() -> Result<LlmSettings, String> {
    let base_url = std::env::var("LLM_BASE_URL")
        .map_err(|_| "Missing required env var: LLM_BASE_URL".to_string())?;
    if base_url.trim().is_empty() {
        return Err("LLM_BASE_URL cannot be empty".to_string());
    }

    let model = std::env::var("LLM_MODEL")
        .map_err(|_| "Missing required env var: LLM_MODEL".to_string())?;
    if model.trim().is_empty() {
        return Err("LLM_MODEL cannot be empty".to_string());
    }

    let api_key = std::env::var("LLM_API_KEY")
        .ok()
        .filter(|s| !s.trim().is_empty());

    let system_prompt = std::env::var("LLM_SYSTEM_PROMPT")
        .ok()
        .filter(|s| !s.trim().is_empty());

    let provider = Provider::detect_from_url(&base_url);

    Ok(LlmSettings {
        base_url,
        api_key,
        model,
        provider,
        system_prompt,
    })
}
