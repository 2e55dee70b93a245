use chrono::Utc;
use twilight_embed_builder::EmbedBuilder;

use crate::core::CommandContext;
use crate::error::CommandResult;
use crate::{GIT_VERSION, VERSION};

const ABOUT_EMBED_COLOR: u32 = 0x00_cea2;

pub async fn about(ctx: CommandContext) -> CommandResult {
    let description = format!(
        "PawBot v{} ({})\nKeeping an eye on the pack and their nicknames.\nUse the configured prefix or mention me to run commands.",
        VERSION, GIT_VERSION
    );

    let embed = EmbedBuilder::new()
        .description(description)?
        .color(ABOUT_EMBED_COLOR)?
        .timestamp(Utc::now().to_rfc3339())
        .build()?;

    ctx.reply_embed(embed).await?;

    Ok(())
}
