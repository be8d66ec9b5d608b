use std::collections::VecDeque;

const DEFAULT_CAPACITY: usize = 1000;

/// Log messages drained from the game, plus whether to show them
#[derive(Debug, Clone)]
pub struct ConsoleBuffer {
    visible: bool,
    capacity: usize,
    messages: VecDeque<String>,
}

impl ConsoleBuffer {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Keep at most `capacity` messages, dropping the oldest first
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            visible: false,
            capacity: capacity.max(1),
            messages: VecDeque::new(),
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = String>) {
        for message in messages {
            if self.messages.len() == self.capacity {
                self.messages.pop_front();
            }
            self.messages.push_back(message);
        }
    }

    /// The newest `count` messages, oldest first
    pub fn latest(&self, count: usize) -> impl Iterator<Item = &str> {
        let skip = self.messages.len().saturating_sub(count);
        self.messages.iter().skip(skip).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for ConsoleBuffer {
    fn default() -> Self {
        Self::new()
    }
}
