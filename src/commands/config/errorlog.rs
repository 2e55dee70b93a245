use crate::core::CommandContext;
use crate::database::configs;
use crate::error::CommandResult;

/// Points escalated command failure reports at a channel. Reports only start
/// flowing once the feature is also toggled on.
pub async fn errorlog_channel(mut ctx: CommandContext) -> CommandResult {
    let guild_id = ctx.get_guild()?;
    let requested = ctx.parser.get_channel_id()?;
    ctx.parser.expect_done()?;
    let channel_id = super::resolve_guild_text_channel(&ctx, guild_id, requested).await?;

    configs::set_error_log_channel(&ctx.bot_context.pool, guild_id, channel_id.0).await?;

    ctx.reply_raw(format!(
        "Channel updated! Command failure reports will be posted in <#{}>",
        channel_id.0
    ))
    .await?;

    Ok(())
}

pub async fn errorlog_toggle(ctx: CommandContext) -> CommandResult {
    let guild_id = ctx.get_guild()?;
    ctx.parser.expect_done()?;

    let enabled = configs::toggle_error_log(&ctx.bot_context.pool, guild_id).await?;

    ctx.reply_raw(if enabled {
        "Error logging Enabled!"
    } else {
        "Error logging Disabled!"
    })
    .await?;

    Ok(())
}
