use tracing::info;

use crate::state::Context;

/// Ask a question about Arehone
#[poise::command(slash_command, guild_only)]
pub async fn ask(
    ctx: Context<'_>,
    #[description = "Ask me anything about Arehone..."] question: String,
) -> Result<(), anyhow::Error> {
    let status = ctx
        .say("🤔 **Thinking...** Searching for information...")
        .await?;

    let channel = ctx.channel_id().get();
    let data = ctx.data();

    info!(user = ctx.author().name, channel, question, "question received");

    let (snippets, strategy) = data.assistant.retrieve(&question).await;

    status
        .edit(
            ctx,
            poise::CreateReply::default()
                .content(format!("🤔 **Processing...** {}", strategy.status_message())),
        )
        .await?;

    let history = data.conversations.history(channel).await;
    let reply = data
        .assistant
        .respond(&question, &snippets, strategy, &history)
        .await;

    info!(
        %strategy,
        snippets = snippets.len(),
        reply_len = reply.len(),
        "reply generated"
    );

    let full = format!(
        "**Q:** {}\n\n{}\n\n*Response generated using {} search strategy*",
        question, reply, strategy
    );
    send_chunked(&ctx, &full).await?;

    data.conversations
        .record_exchange(channel, &question, &reply)
        .await;
    Ok(())
}

/// Send a message in Discord-safe chunks (max 1990 chars).
pub(super) async fn send_chunked(ctx: &Context<'_>, text: &str) -> Result<(), anyhow::Error> {
    for chunk in split_chunks(text, 1990) {
        ctx.say(chunk).await?;
    }
    Ok(())
}

/// Split on the last newline (or space) before `max` bytes, never inside a char.
fn split_chunks(text: &str, max: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut remaining = text;
    while !remaining.is_empty() {
        if remaining.len() <= max {
            chunks.push(remaining);
            break;
        }
        let mut limit = max;
        while !remaining.is_char_boundary(limit) {
            limit -= 1;
        }
        let split_at = remaining[..limit]
            .rfind('\n')
            .or_else(|| remaining[..limit].rfind(' '))
            .map(|i| i + 1)
            .unwrap_or(limit);
        chunks.push(&remaining[..split_at]);
        remaining = &remaining[split_at..];
    }
    chunks
}
