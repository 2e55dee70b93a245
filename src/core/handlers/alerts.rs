use std::sync::Arc;

use log::debug;
use twilight_gateway::Event;
use twilight_model::id::{ChannelId, GuildId};
use twilight_model::user::User;

use crate::core::BotContext;
use crate::error::{EventHandlerError, MessageError};

/// Watches member state for nickname changes and announces them in the
/// channel a guild configured for it.
pub async fn handle_event(event: &Event, ctx: &Arc<BotContext>) -> Result<(), EventHandlerError> {
    match event {
        Event::MemberAdd(member) => {
            ctx.remember_nickname(member.guild_id, member.user.id, member.nick.clone());
        }
        Event::MemberChunk(chunk) => {
            for member in &chunk.members {
                ctx.remember_nickname(chunk.guild_id, member.user.id, member.nick.clone());
            }
        }
        Event::MemberUpdate(update) => {
            let previous = ctx.remember_nickname(update.guild_id, update.user.id, update.nick.clone());

            // Only a known member changing nicknames is worth an alert, the
            // first sighting just seeds the map.
            if let Some(previous) = previous {
                if previous != update.nick {
                    notify(ctx, update.guild_id, &update.user, &previous, &update.nick).await?;
                }
            }
        }
        Event::GuildDelete(guild) => {
            ctx.forget_guild(guild.id);
        }
        _ => {}
    }
    Ok(())
}

async fn notify(
    ctx: &Arc<BotContext>,
    guild_id: GuildId,
    user: &User,
    old: &Option<String>,
    new: &Option<String>,
) -> Result<(), EventHandlerError> {
    let config = match ctx.get_nickname_alert_config(guild_id).await? {
        Some(config) => config,
        None => return Ok(()),
    };

    if !config.enabled || config.channel_id == 0 {
        return Ok(());
    }

    debug!(
        "User {} changed their nickname in guild {}, sending an alert",
        user.id, guild_id
    );

    let text = format!(
        "**{}#{}** changed their nickname from ``{}`` to ``{}``",
        user.name,
        user.discriminator,
        old.as_deref().unwrap_or("no nickname"),
        new.as_deref().unwrap_or("no nickname"),
    );

    ctx.http
        .create_message(ChannelId(config.channel_id as u64))
        .content(text)
        .map_err(MessageError::Create)?
        .await?;

    Ok(())
}
