use crate::conversation::WELCOME_MESSAGE;
use crate::state::Context;

const CONTACT_LINKS: &str = "**📞 Contact**
- [LinkedIn](https://www.linkedin.com/in/arehone-matodzi-766ab0210/)
- [Email](mailto:arehonematodzi456@gmail.com)
- Phone: 0739298456";

/// How to reach Arehone directly
#[poise::command(slash_command, guild_only)]
pub async fn contact(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    ctx.say(CONTACT_LINKS).await?;
    Ok(())
}

/// Introduce the assistant
#[poise::command(slash_command, guild_only)]
pub async fn welcome(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    ctx.say(WELCOME_MESSAGE).await?;
    Ok(())
}
