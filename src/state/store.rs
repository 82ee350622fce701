//! In-memory transcript of the conversation.

use crate::models::Message;

/// Ordered list of messages.
///
/// Messages are only ever appended; the whole list can be reset, but no
/// single entry is removed or reordered.
#[derive(Debug, Clone, Default)]
pub struct MessageStore {
    messages: Vec<Message>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message and return its index.
    pub fn append(&mut self, message: Message) -> usize {
        self.messages.push(message);
        self.messages.len() - 1
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn get(&self, index: usize) -> Option<&Message> {
        self.messages.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Message> {
        self.messages.get_mut(index)
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatMode, MessageRole};

    #[test]
    fn test_append_returns_index_in_order() {
        let mut store = MessageStore::new();
        assert!(store.is_empty());
        assert_eq!(store.append(Message::user("one", ChatMode::Normal)), 0);
        assert_eq!(
            store.append(Message::assistant_placeholder(ChatMode::Normal)),
            1
        );
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().content, "one");
        assert_eq!(store.last().unwrap().role, MessageRole::Assistant);
    }

    #[test]
    fn test_get_mut_and_clear() {
        let mut store = MessageStore::new();
        let idx = store.append(Message::user("a", ChatMode::Normal));
        store.get_mut(idx).unwrap().content.push('b');
        assert_eq!(store.iter().next().unwrap().content, "ab");

        store.clear();
        assert!(store.is_empty());
        assert!(store.get(0).is_none());
        assert!(store.last().is_none());
    }
}
