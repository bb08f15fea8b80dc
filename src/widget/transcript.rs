//! The visible message list.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::broadcast;

/// Capacity of the render event channel.
const EVENT_CAPACITY: usize = 256;

/// Who a rendered message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// Typed by the user.
    User,
    /// Produced on behalf of the bot (placeholder, reply or error text).
    Bot,
}

/// A rendered chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    /// Displayed text.
    pub text: String,
    /// Author.
    pub sender: Sender,
    /// When the message was appended.
    pub created_at: DateTime<Utc>,
}

/// Change notification for hosts that render the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    /// A message was appended at `index`.
    Appended {
        /// Position in the list.
        index: usize,
        /// The new message.
        message: Message,
    },
    /// The text of the message at `index` was replaced.
    Updated {
        /// Position in the list.
        index: usize,
        /// The new text.
        text: String,
    },
}

/// Append-only list of messages shown by the widget.
///
/// Cloning is cheap and every clone refers to the same list.
#[derive(Debug, Clone)]
pub struct Transcript {
    inner: Arc<TranscriptInner>,
}

#[derive(Debug)]
struct TranscriptInner {
    messages: RwLock<Vec<Message>>,
    /// Index of the entry the list is scrolled to.
    scroll_position: RwLock<Option<usize>>,
    events: broadcast::Sender<TranscriptEvent>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// Create an empty transcript.
    #[must_use]
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(TranscriptInner {
                messages: RwLock::new(Vec::new()),
                scroll_position: RwLock::new(None),
                events,
            }),
        }
    }

    /// Append a message, scroll to it and return a handle for later updates.
    pub fn append(&self, text: impl Into<String>, sender: Sender) -> MessageHandle {
        let message = Message {
            text: text.into(),
            sender,
            created_at: Utc::now(),
        };

        let mut guard = self.inner.messages.write().unwrap();
        let index = guard.len();
        guard.push(message.clone());
        drop(guard);

        *self.inner.scroll_position.write().unwrap() = Some(index);

        // No subscribers is fine; the list itself is the source of truth.
        let _ = self
            .inner
            .events
            .send(TranscriptEvent::Appended { index, message });

        MessageHandle {
            transcript: self.clone(),
            index,
        }
    }

    /// Replace the text at `index`. Returns `false` if no such entry exists.
    fn set_text(&self, index: usize, text: &str) -> bool {
        let mut guard = self.inner.messages.write().unwrap();
        let Some(message) = guard.get_mut(index) else {
            return false;
        };
        message.text = text.to_string();
        drop(guard);

        let _ = self.inner.events.send(TranscriptEvent::Updated {
            index,
            text: text.to_string(),
        });
        true
    }

    /// Snapshot of all messages.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.inner.messages.read().unwrap().clone()
    }

    /// Message at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Message> {
        self.inner.messages.read().unwrap().get(index).cloned()
    }

    /// Number of messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.messages.read().unwrap().len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index of the entry currently scrolled into view.
    #[must_use]
    pub fn scroll_position(&self) -> Option<usize> {
        *self.inner.scroll_position.read().unwrap()
    }

    /// Subscribe to append/update notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TranscriptEvent> {
        self.inner.events.subscribe()
    }

    /// Handle to `index`, whether or not an entry exists there.
    #[cfg(test)]
    pub(crate) fn handle_for(&self, index: usize) -> MessageHandle {
        MessageHandle {
            transcript: self.clone(),
            index,
        }
    }
}

/// Handle to a message whose text may be replaced once.
///
/// [`MessageHandle::replace_text`] consumes the handle, so a placeholder
/// cannot be overwritten twice.
#[derive(Debug)]
pub struct MessageHandle {
    transcript: Transcript,
    index: usize,
}

impl MessageHandle {
    /// Position of the message in the transcript.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Overwrite the message text. Returns `false` if the message is gone.
    pub fn replace_text(self, text: &str) -> bool {
        self.transcript.set_text(self.index, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_scrolls_to_newest() {
        let transcript = Transcript::new();
        assert!(transcript.is_empty());
        assert_eq!(transcript.scroll_position(), None);

        transcript.append("one", Sender::User);
        let second = transcript.append("two", Sender::Bot);

        assert_eq!(transcript.len(), 2);
        assert_eq!(second.index(), 1);
        assert_eq!(transcript.scroll_position(), Some(1));
    }

    #[test]
    fn test_replace_text_updates_in_place() {
        let transcript = Transcript::new();
        let handle = transcript.append("Thinking...", Sender::Bot);
        assert_eq!(transcript.get(handle.index()).unwrap().text, "Thinking...");

        assert!(handle.replace_text("Done"));

        let messages = transcript.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "Done");
        assert_eq!(messages[0].sender, Sender::Bot);
    }

    #[test]
    fn test_clones_share_the_list() {
        let transcript = Transcript::new();
        let other = transcript.clone();
        other.append("hi", Sender::User);
        assert_eq!(transcript.len(), 1);
    }

    #[test]
    fn test_events_are_broadcast() {
        let transcript = Transcript::new();
        let mut rx = transcript.subscribe();

        let handle = transcript.append("Thinking...", Sender::Bot);
        handle.replace_text("Hello");

        match rx.try_recv().unwrap() {
            TranscriptEvent::Appended { index, message } => {
                assert_eq!(index, 0);
                assert_eq!(message.text, "Thinking...");
            }
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(
            rx.try_recv().unwrap(),
            TranscriptEvent::Updated {
                index: 0,
                text: "Hello".to_string()
            }
        );
    }

    #[test]
    fn test_replace_missing_entry_fails() {
        let transcript = Transcript::new();
        let mut rx = transcript.subscribe();

        assert!(!transcript.handle_for(3).replace_text("late"));
        assert!(transcript.is_empty());
        assert!(rx.try_recv().is_err());
    }
}
