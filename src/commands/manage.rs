use tracing::info;

use crate::conversation::WELCOME_MESSAGE;
use crate::state::Context;
use poise::serenity_prelude as serenity;

/// Clear this channel's conversation history
#[poise::command(slash_command, guild_only)]
pub async fn clear(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    ctx.data()
        .conversations
        .clear(ctx.channel_id().get())
        .await;
    ctx.say("🗑️ Chat cleared.").await?;
    Ok(())
}

/// Start a fresh conversation with the assistant in its own thread
#[poise::command(slash_command, guild_only)]
pub async fn thread(
    ctx: Context<'_>,
    #[description = "Thread name"] name: Option<String>,
) -> Result<(), anyhow::Error> {
    let title = name.unwrap_or_else(|| format!("Chat about Arehone with {}", ctx.author().name));

    let conversation = ctx
        .channel_id()
        .create_thread(
            ctx.http(),
            serenity::CreateThread::new(title).kind(serenity::ChannelType::PublicThread),
        )
        .await?;

    // Thread gets its own history, opening with the welcome turn.
    ctx.data().conversations.start(conversation.id.get()).await;
    conversation.id.say(ctx.http(), WELCOME_MESSAGE).await?;
    info!(user = ctx.author().name, thread = conversation.id.get(), "conversation thread started");

    ctx.say(format!("Continue the conversation in <#{}>", conversation.id))
        .await?;
    Ok(())
}
