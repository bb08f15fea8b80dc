//! Terminal host for the chat widget.
//!
//! Every line read from the input is treated as a form submission. The
//! transcript is rendered as it changes, one line per append or update.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::widget::{ChatWidget, Sender, TranscriptEvent};

/// Format a transcript line for display.
#[must_use]
pub fn format_line(sender: Sender, text: &str) -> String {
    let prefix = match sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    };
    format!("{prefix}> {text}\n")
}

/// Write transcript events to `output` until the transcript is dropped.
pub async fn render<W>(
    mut events: broadcast::Receiver<TranscriptEvent>,
    mut output: W,
) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    loop {
        let line = match events.recv().await {
            Ok(TranscriptEvent::Appended { message, .. }) => {
                format_line(message.sender, &message.text)
            }
            // Only bot placeholders are ever updated.
            Ok(TranscriptEvent::Updated { text, .. }) => format_line(Sender::Bot, &text),
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Renderer fell behind the transcript");
                continue;
            }
            Err(RecvError::Closed) => break,
        };
        output.write_all(line.as_bytes()).await?;
        output.flush().await?;
    }
    Ok(())
}

/// Drive `widget` from line-oriented `input`.
///
/// Each exchange runs as its own task, so a slow reply never blocks the next
/// submission. Returns once the input is exhausted and every in-flight
/// exchange has settled. A read error stops further submissions but is only
/// returned after the exchanges already started have settled.
pub async fn run<R>(widget: &ChatWidget, input: R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut in_flight = JoinSet::new();

    let read = loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                widget.input().set_value(&line);
                match widget.submit_form() {
                    Some(exchange) => {
                        debug!(exchange_id = %exchange.id(), "Exchange started");
                        in_flight.spawn(exchange.settle());
                    }
                    None => debug!("Skipped blank line"),
                }
            }
            Ok(None) => break Ok(()),
            Err(e) => {
                warn!(error = %e, "Failed to read input line");
                break Err(e);
            }
        }
    };

    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "Exchange task failed");
        }
    }
    read
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(Sender::User, "hi"), "you> hi\n");
        assert_eq!(format_line(Sender::Bot, "Thinking..."), "bot> Thinking...\n");
    }
}
