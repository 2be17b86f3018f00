use std::collections::{HashMap, VecDeque};

use tokio::sync::RwLock;

use crate::llm::Message;
use crate::rag::HISTORY_WINDOW;

/// Greeting that opens every channel's conversation.
pub const WELCOME_MESSAGE: &str = "👋 **Welcome! I'm Arehone's AI Assistant.**

I'm here to help you learn about Arehone Matodzi's skills, experience, and background.

**Try asking me about:**
- Technical skills and experience
- Project portfolio
- Educational background
- Work history
- Specific technologies or tools
- Anything else you'd like to know!

*What would you like to know about Arehone?*";

/// Recent turns of one channel plus the number of messages ever posted.
struct ChannelHistory {
    recent: VecDeque<Message>,
    total: u64,
}

impl ChannelHistory {
    fn seeded() -> Self {
        let mut history = Self::empty();
        history.push(Message::assistant(WELCOME_MESSAGE));
        history
    }

    fn empty() -> Self {
        Self {
            recent: VecDeque::with_capacity(HISTORY_WINDOW + 1),
            total: 0,
        }
    }

    /// Only the last [`HISTORY_WINDOW`] turns are retained.
    fn push(&mut self, message: Message) {
        if self.recent.len() == HISTORY_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(message);
        self.total += 1;
    }
}

/// Per-channel chat history. Each new history starts with the welcome turn.
pub struct ConversationStore {
    channels: RwLock<HashMap<u64, ChannelHistory>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            channels: RwLock::new(HashMap::new()),
        }
    }

    /// The channel's most recent turns, oldest first.
    pub async fn history(&self, channel: u64) -> Vec<Message> {
        match self.channels.read().await.get(&channel) {
            Some(history) => history.recent.iter().cloned().collect(),
            None => vec![Message::assistant(WELCOME_MESSAGE)],
        }
    }

    /// Append one exchange after the reply has been delivered.
    pub async fn record_exchange(&self, channel: u64, question: &str, reply: &str) {
        let mut channels = self.channels.write().await;
        let history = channels.entry(channel).or_insert_with(ChannelHistory::seeded);
        history.push(Message::user(question));
        history.push(Message::assistant(reply));
    }

    /// Messages posted in the channel, including ones no longer retained.
    pub async fn message_count(&self, channel: u64) -> u64 {
        self.channels
            .read()
            .await
            .get(&channel)
            .map_or(1, |history| history.total)
    }

    /// Begin a fresh conversation that opens with the welcome turn.
    pub async fn start(&self, channel: u64) {
        self.channels
            .write()
            .await
            .insert(channel, ChannelHistory::seeded());
    }

    /// Drop the channel's history entirely.
    pub async fn clear(&self, channel: u64) {
        self.channels
            .write()
            .await
            .insert(channel, ChannelHistory::empty());
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_channel_starts_with_welcome() {
        let store = ConversationStore::new();
        assert_eq!(store.history(7).await, vec![Message::assistant(WELCOME_MESSAGE)]);
        assert_eq!(store.message_count(7).await, 1);
    }

    #[tokio::test]
    async fn exchanges_append_in_order_per_channel() {
        let store = ConversationStore::new();
        store.record_exchange(1, "Skills?", "Rust.").await;
        store.record_exchange(1, "Projects?", "A chatbot.").await;
        store.record_exchange(2, "Education?", "BSc.").await;

        let history = store.history(1).await;
        assert_eq!(history.len(), 5);
        assert_eq!(history[1], Message::user("Skills?"));
        assert_eq!(history[4], Message::assistant("A chatbot."));
        assert_eq!(store.message_count(2).await, 3);
    }

    #[tokio::test]
    async fn long_conversations_keep_only_recent_turns() {
        let store = ConversationStore::new();
        for i in 0..5000 {
            store
                .record_exchange(1, &format!("question {i}"), &format!("answer {i}"))
                .await;
        }

        let history = store.history(1).await;
        assert_eq!(history.len(), HISTORY_WINDOW);
        assert_eq!(history[0], Message::user("question 4995"));
        assert_eq!(history[HISTORY_WINDOW - 1], Message::assistant("answer 4999"));
        assert_eq!(store.message_count(1).await, 10_001);
    }

    #[tokio::test]
    async fn clear_empties_history() {
        let store = ConversationStore::new();
        store.record_exchange(1, "Skills?", "Rust.").await;
        store.clear(1).await;

        assert!(store.history(1).await.is_empty());
        assert_eq!(store.message_count(1).await, 0);

        store.record_exchange(1, "Again?", "Yes.").await;
        assert_eq!(store.history(1).await.len(), 2);
    }

    #[tokio::test]
    async fn start_seeds_a_fresh_conversation() {
        let store = ConversationStore::new();
        store.record_exchange(9, "Skills?", "Rust.").await;
        store.start(9).await;

        assert_eq!(store.history(9).await, vec![Message::assistant(WELCOME_MESSAGE)]);
        assert_eq!(store.message_count(9).await, 1);
    }
}
