//! Conversation store: ordered, append-only, owned by one session.

use prompt::ChatMessage;
use std::fmt;
use tutor_core::{FlowError, Message, MessageId, Sender};
use uuid::Uuid;

/// Identity of one conversation lifetime. Replaced when the session resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationId(Uuid);

impl ConversationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Insertion order is display order is chronological order. No reordering, deletion or dedup.
///
/// Ids come from a per-store counter, so two messages created in the same instant still order correctly.
#[derive(Debug, Clone)]
pub struct Conversation {
    id: ConversationId,
    messages: Vec<Message>,
    next_id: u64,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            id: ConversationId::new(),
            messages: Vec::new(),
            next_id: 1,
        }
    }

    pub fn id(&self) -> ConversationId {
        self.id
    }

    /// Appends a text message at the end. Blank content is rejected and nothing is stored.
    pub fn append(&mut self, sender: Sender, content: impl Into<String>) -> Result<&Message, FlowError> {
        let message = Message::text(MessageId(self.next_id), sender, content)?;
        self.next_id += 1;
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// History as request turns, chronological: user → `User`, system → `Assistant` (Gemini `model`).
    pub fn history_turns(&self) -> Vec<ChatMessage> {
        self.messages.iter().map(to_chat_message).collect()
    }
}

fn to_chat_message(message: &Message) -> ChatMessage {
    match message.sender() {
        Sender::User => ChatMessage::user(message.content()),
        Sender::System => ChatMessage::assistant(message.content()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt::MessageRole;

    #[test]
    fn test_read_order_equals_append_order() {
        let mut conv = Conversation::new();
        let inputs: Vec<String> = (0..50).map(|i| format!("message {}", i)).collect();
        for (i, text) in inputs.iter().enumerate() {
            let sender = if i % 3 == 0 { Sender::System } else { Sender::User };
            conv.append(sender, text.clone()).unwrap();
        }
        let read: Vec<&str> = conv.messages().iter().map(|m| m.content()).collect();
        assert_eq!(read, inputs.iter().map(String::as_str).collect::<Vec<_>>());
        let ids: Vec<u64> = conv.messages().iter().map(|m| m.id().0).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_blank_append_is_rejected_and_store_unchanged() {
        let mut conv = Conversation::new();
        conv.append(Sender::User, "2+2=?").unwrap();
        assert_eq!(conv.append(Sender::User, "   ").unwrap_err(), FlowError::EmptyInput);
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.last().unwrap().content(), "2+2=?");
        // rejected appends do not consume ids
        let next = conv.append(Sender::System, "4").unwrap();
        assert_eq!(next.id(), MessageId(2));
    }

    #[test]
    fn test_history_turns_map_senders_in_order() {
        let mut conv = Conversation::new();
        conv.append(Sender::User, "2+2=?").unwrap();
        conv.append(Sender::System, "4").unwrap();
        conv.append(Sender::User, "thanks").unwrap();
        let turns = conv.history_turns();
        let roles: Vec<MessageRole> = turns.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]
        );
        assert_eq!(turns[1].content, "4");
    }

    #[test]
    fn test_each_conversation_has_its_own_id() {
        assert_ne!(Conversation::new().id(), Conversation::new().id());
    }
}
