use async_trait::async_trait;
use chatbot_widget::client::ChatTransport;
use chatbot_widget::error::{ChatError, Result};
use chatbot_widget::terminal;
use chatbot_widget::types::{ChatRequest, ChatResponse};
use chatbot_widget::widget::ChatWidget;

/// Answers "fail" with a 503 and everything else with an upper-cased echo.
struct ShoutTransport;

#[async_trait]
impl ChatTransport for ShoutTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let text = &request.messages[0].text;
        if text == "fail" {
            return Err(ChatError::BadResponse { status: 503 });
        }
        Ok(ChatResponse {
            result: Some(text.to_uppercase()),
        })
    }
}

#[tokio::test]
async fn test_lines_become_exchanges() {
    let widget = ChatWidget::new(ShoutTransport);
    let events = widget.transcript().subscribe();

    terminal::run(&widget, "hello\n\n   \nfail\n".as_bytes())
        .await
        .unwrap();

    let messages: Vec<String> = widget
        .transcript()
        .messages()
        .into_iter()
        .map(|m| m.text)
        .collect();
    assert_eq!(
        messages,
        vec![
            "hello",
            "HELLO",
            "fail",
            "Failed to get response from server."
        ]
    );
    assert_eq!(widget.input().value(), "");

    // Dropping the widget closes the event stream, so render drains and returns.
    drop(widget);
    let mut out = Vec::new();
    terminal::render(events, &mut out).await.unwrap();
    let rendered = String::from_utf8(out).unwrap();

    assert!(rendered.starts_with("you> hello\nbot> Thinking...\n"));
    assert!(rendered.contains("bot> HELLO\n"));
    assert!(rendered.contains("you> fail\n"));
    assert!(rendered.contains("bot> Failed to get response from server.\n"));
    assert_eq!(rendered.lines().count(), 6);
}

#[tokio::test]
async fn test_blank_input_renders_nothing() {
    let widget = ChatWidget::new(ShoutTransport);
    let events = widget.transcript().subscribe();

    terminal::run(&widget, " \n\t\n".as_bytes()).await.unwrap();
    assert!(widget.transcript().is_empty());

    drop(widget);
    let mut out = Vec::new();
    terminal::render(events, &mut out).await.unwrap();
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_read_error_lets_pending_exchanges_settle() {
    let widget = ChatWidget::new(ShoutTransport);

    // The second line is not valid UTF-8, so reading it fails.
    let input: &[u8] = b"hello\n\xff\xfe\n";
    let err = terminal::run(&widget, input).await.unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);

    let messages: Vec<String> = widget
        .transcript()
        .messages()
        .into_iter()
        .map(|m| m.text)
        .collect();
    assert_eq!(messages, vec!["hello", "HELLO"]);
}
