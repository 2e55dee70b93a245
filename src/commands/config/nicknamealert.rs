use crate::core::CommandContext;
use crate::database::configs;
use crate::error::CommandResult;

pub async fn nicknamealert_channel(mut ctx: CommandContext) -> CommandResult {
    let guild_id = ctx.get_guild()?;
    let requested = ctx.parser.get_channel_id()?;
    ctx.parser.expect_done()?;
    let channel_id = super::resolve_guild_text_channel(&ctx, guild_id, requested).await?;

    configs::set_nickname_alert_channel(&ctx.bot_context.pool, guild_id, channel_id.0).await?;

    ctx.reply_raw(format!(
        "Channel updated! I will send nickname alerts to <#{}>",
        channel_id.0
    ))
    .await?;

    Ok(())
}

pub async fn nicknamealert_toggle(ctx: CommandContext) -> CommandResult {
    let guild_id = ctx.get_guild()?;
    ctx.parser.expect_done()?;

    let enabled = configs::toggle_nickname_alert(&ctx.bot_context.pool, guild_id).await?;

    ctx.reply_raw(if enabled {
        "Nickname Alerts Enabled!"
    } else {
        "Nickname Alerts Disabled!"
    })
    .await?;

    Ok(())
}
