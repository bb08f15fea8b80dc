//! Chat widget server and terminal client.
//!
//! `chatbot serve` runs the `/api/chat` server; `chatbot chat` runs the
//! widget in the terminal against a running server.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use chatbot_widget::client::HttpTransport;
use chatbot_widget::config::{AppConfig, Cli, Command, load_llm_settings};
use chatbot_widget::llm::{ChatBackend, ChatCompletionsBackend};
use chatbot_widget::server::start_server;
use chatbot_widget::terminal;
use chatbot_widget::widget::ChatWidget;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env (if present)
    let _ = dotenv();

    let cli = Cli::parse();
    let config = match AppConfig::from_cli(&cli) {
        Ok(c) => Arc::new(c),
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing (M-LOG-STRUCTURED). Logs go to stderr so the
    // terminal transcript on stdout stays clean.
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match cli.command {
        Some(Command::Chat { .. }) => run_chat(&config).await,
        Some(Command::Serve { .. }) | None => run_server(config).await,
    }
}

async fn run_server(config: Arc<AppConfig>) -> anyhow::Result<()> {
    let settings = match load_llm_settings() {
        Ok(s) => s,
        Err(msg) => {
            eprintln!("Configuration error: {msg}");
            std::process::exit(1);
        }
    };

    info!(
        name: "llm.config.loaded",
        base_url = %settings.base_url,
        model = %settings.model,
        provider = ?settings.provider,
        "LLM configuration loaded"
    );

    let backend: Arc<dyn ChatBackend> = Arc::new(ChatCompletionsBackend::new(settings));
    start_server(config, backend).await
}

async fn run_chat(config: &AppConfig) -> anyhow::Result<()> {
    let transport = HttpTransport::new(&config.widget.endpoint)?;
    info!(
        name: "widget.started",
        endpoint = %transport.endpoint(),
        "Chat widget started"
    );

    let widget = ChatWidget::new(transport);
    let renderer = tokio::spawn(terminal::render(
        widget.transcript().subscribe(),
        tokio::io::stdout(),
    ));

    terminal::run(&widget, BufReader::new(tokio::io::stdin())).await?;

    // Closing the transcript ends the renderer.
    drop(widget);
    renderer.await??;
    Ok(())
}
