use std::time::Instant;

use crate::core::CommandContext;
use crate::error::CommandResult;

pub async fn ping(ctx: CommandContext) -> CommandResult {
    let start = Instant::now();
    let sent_msg = ctx.reply_raw(":ping_pong:").await?;

    let rest_time = start.elapsed().as_millis();

    ctx.update_message(
        format!(":ping_pong: REST api ping is {}ms", rest_time),
        sent_msg.channel_id,
        sent_msg.id,
    )
    .await?;

    Ok(())
}
