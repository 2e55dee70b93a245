use twilight_model::channel::{Channel, GuildChannel};
use twilight_model::id::{ChannelId, GuildId};

pub use errorlog::{errorlog_channel, errorlog_toggle};
pub use nicknamealert::{nicknamealert_channel, nicknamealert_toggle};

use crate::core::CommandContext;
use crate::error::CommandError;

mod errorlog;
mod nicknamealert;

/// Resolves a channel argument against the guild the command came from. The
/// id has to belong to a text channel of that same guild, anything else is
/// an object the invoker got wrong.
async fn resolve_guild_text_channel(
    ctx: &CommandContext,
    guild_id: GuildId,
    channel_id: ChannelId,
) -> Result<ChannelId, CommandError> {
    let channel = ctx.bot_context.http.channel(channel_id).await?;

    match channel {
        Some(Channel::Guild(GuildChannel::Text(channel))) if channel.guild_id == Some(guild_id) => Ok(channel.id),
        _ => Err(CommandError::ObjectNotFound(format!(
            "no text channel with id {} in this server",
            channel_id
        ))),
    }
}
