mod ask;
mod contact;
mod manage;
mod status;

use crate::state::Context;

/// Arehone's AI Assistant - get to know Arehone Matodzi
#[poise::command(
    slash_command,
    subcommands(
        "ask::ask",
        "contact::welcome",
        "status::status",
        "status::preload",
        "contact::contact",
        "manage::clear",
        "manage::thread"
    )
)]
pub async fn arehone(_ctx: Context<'_>) -> Result<(), anyhow::Error> {
    Ok(())
}
