use std::sync::Arc;

use crate::conversation::ConversationStore;
use crate::rag::Assistant;

pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub conversations: Arc<ConversationStore>,
}

pub type Context<'a> = poise::Context<'a, AppState, anyhow::Error>;
