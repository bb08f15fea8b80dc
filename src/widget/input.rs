//! Text input field owned by the widget.

use std::sync::{Arc, Mutex};

/// A text input the widget reads from and clears after a submission.
pub trait InputField: Send + Sync {
    /// Current contents.
    fn value(&self) -> String;
    /// Replace the contents.
    fn set_value(&self, value: &str);
    /// Empty the field.
    fn clear(&self) {
        self.set_value("");
    }
}

/// In-memory [`InputField`] shared between a host and the widget.
#[derive(Debug, Clone, Default)]
pub struct InputBuffer {
    value: Arc<Mutex<String>>,
}

impl InputBuffer {
    /// Create an empty input buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputField for InputBuffer {
    fn value(&self) -> String {
        self.value.lock().unwrap().clone()
    }

    fn set_value(&self, value: &str) {
        let mut guard = self.value.lock().unwrap();
        guard.clear();
        guard.push_str(value);
    }
}
