//! Player counter display state.

/// Text shown by the counter overlay. Each message from the feed replaces the
/// previous one verbatim; nothing is parsed or accumulated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterDisplay {
    text: Option<String>,
}

impl CounterDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message and return the text to show.
    pub fn receive(&mut self, message: impl Into<String>) -> &str {
        self.text.insert(message.into())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}
