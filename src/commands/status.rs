use tracing::info;

use crate::state::Context;

const HOW_I_WORK: &str = "**🔍 How I Work**
**Search Strategy:**
1. Direct Search
2. Enhanced Fallback
3. Cached Knowledge

**Always Available:**
- RAG + LLM responses
- Direct Arehone contact info";

/// Show knowledge base state and chat stats
#[poise::command(slash_command, guild_only)]
pub async fn status(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    let data = ctx.data();
    let knowledge = match data.assistant.knowledge_status().await {
        Some(count) => format!("✅ Knowledge base ready ({} documents)", count),
        None => "💡 Knowledge base will initialize when needed".to_string(),
    };
    let messages = data
        .conversations
        .message_count(ctx.channel_id().get())
        .await;

    ctx.say(format!(
        "**📊 System Status**\n{}\n\n{}\n\n**💬 Chat Stats**\nMessages: {}",
        knowledge, HOW_I_WORK, messages
    ))
    .await?;
    Ok(())
}

/// Load the general knowledge base now instead of on first need
#[poise::command(slash_command, guild_only)]
pub async fn preload(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    ctx.defer().await?;

    let assistant = &ctx.data().assistant;
    let count = assistant.preload().await;
    let loaded = assistant.knowledge_status().await;
    info!(
        user = ctx.author().name,
        documents = count,
        loaded = loaded.is_some(),
        "knowledge base preload requested"
    );

    ctx.say(preload_message(loaded)).await?;
    Ok(())
}

/// Reply for a preload attempt; `None` means the bootstrap search failed.
fn preload_message(loaded: Option<usize>) -> String {
    match loaded {
        Some(count) => format!("✅ Loaded {} documents", count),
        None => "⚠️ Couldn't load the knowledge base right now. It will be retried on the next \
                 question or preload."
            .to_string(),
    }
}
