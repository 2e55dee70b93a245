use std::sync::Arc;

use chrono::Utc;
use log::debug;
use twilight_embed_builder::{EmbedAuthorBuilder, EmbedBuilder, ImageSource};
use twilight_model::channel::embed::Embed;
use twilight_model::channel::{Channel, GuildChannel};
use twilight_model::id::{ChannelId, GuildId};
use url::Url;

use crate::core::logging::DISCORD_AVATAR_URL;
use crate::core::{BotContext, CommandMessage};
use crate::database::configs::ErrorLogConfig;
use crate::error::{CommandError, MessageError};

const REPORT_EMBED_COLOR: u32 = 0x00_ff_00_00;

/// Forwards an escalated command failure to the channel the guild set aside
/// for them. Every way this can come up short is a silent no-op: a guild
/// that never opted in, a disabled config, an unset or deleted channel, or
/// the delivery itself failing. The invoker already got their reply, this
/// path owes nobody anything.
pub async fn report(ctx: Arc<BotContext>, error: CommandError, message: CommandMessage) {
    let config = match message.guild_id {
        Some(guild_id) => match ctx.get_error_log_config(guild_id).await {
            Ok(config) => config,
            Err(e) => {
                debug!("Failure report dropped, config lookup failed: {}", e);
                return;
            }
        },
        // Direct message, there is no guild config to consult.
        None => return,
    };

    let target = match report_target(message.guild_id, config.as_ref()) {
        Some(target) => target,
        None => return,
    };

    // The configured channel may be long gone, that invalidates the report
    // rather than escalating further.
    let channel = match ctx.http.channel(target).await {
        Ok(Some(Channel::Guild(GuildChannel::Text(channel)))) if channel.guild_id == message.guild_id => channel,
        Ok(_) => return,
        Err(e) => {
            debug!("Failure report dropped, channel {} did not resolve: {}", target, e);
            return;
        }
    };

    let embed = match report_embed(&error, &message) {
        Ok(embed) => embed,
        Err(e) => {
            debug!("Failure report dropped, embed construction failed: {}", e);
            return;
        }
    };

    match ctx.http.create_message(channel.id).embed(embed) {
        Ok(send) => {
            if let Err(e) = send.await {
                debug!("Failed to deliver a failure report to channel {}: {}", channel.id, e);
            }
        }
        Err(e) => debug!("Failed to assemble the failure report message: {}", e),
    }
}

/// Where an escalated failure from this message should be reported, if
/// anywhere. A missing config, a disabled one and an unset channel are all
/// the same answer.
fn report_target(guild_id: Option<GuildId>, config: Option<&ErrorLogConfig>) -> Option<ChannelId> {
    guild_id?;
    let config = config?;

    if !config.enabled || config.channel_id == 0 {
        return None;
    }

    Some(ChannelId(config.channel_id as u64))
}

/// The diagnostic itself: who ran what where, the failure kind, the raw
/// reason, and when the report was put together.
fn report_embed(error: &CommandError, message: &CommandMessage) -> Result<Embed, MessageError> {
    let mut author =
        EmbedAuthorBuilder::new().name(format!("{}#{}", message.author.name, message.author.discriminator))?;

    if let Some(avatar) = &message.author.avatar {
        let extension = if avatar.starts_with("a_") { "gif" } else { "png" };
        let avatar_url = format!("{}{}/{}.{}", DISCORD_AVATAR_URL, message.author.id, avatar, extension);
        // A malformed avatar reference just means no icon on the report.
        if Url::parse(&avatar_url).is_ok() {
            author = author.icon_url(ImageSource::url(avatar_url)?);
        }
    }

    if let Some(link) = jump_link(message) {
        author = author.url(link);
    }

    let embed = EmbedBuilder::new()
        .author(author.build())
        .description(format!("{}\n```{}```", error.kind_name(), error))?
        .color(REPORT_EMBED_COLOR)?
        .timestamp(Utc::now().to_rfc3339())
        .build()?;

    Ok(embed)
}

/// Link back to the message that caused all this.
fn jump_link(message: &CommandMessage) -> Option<String> {
    message.guild_id.map(|guild_id| {
        format!(
            "https://discord.com/channels/{}/{}/{}",
            guild_id, message.channel_id, message.id
        )
    })
}

#[cfg(test)]
mod tests {
    use twilight_model::id::{ChannelId, GuildId, MessageId, UserId};
    use twilight_model::user::User;

    use super::{jump_link, report_embed, report_target};
    use crate::core::CommandMessage;
    use crate::database::configs::ErrorLogConfig;
    use crate::error::CommandError;

    const GUILD: GuildId = GuildId(100);

    fn enabled_config(channel_id: i64) -> ErrorLogConfig {
        ErrorLogConfig {
            enabled: true,
            channel_id,
        }
    }

    fn message(avatar: Option<&str>) -> CommandMessage {
        CommandMessage {
            id: MessageId(777),
            content: String::from(".broken"),
            author: User {
                avatar: avatar.map(String::from),
                bot: false,
                discriminator: String::from("0420"),
                email: None,
                flags: None,
                id: UserId(42),
                locale: None,
                mfa_enabled: None,
                name: String::from("goodboy"),
                premium_type: None,
                public_flags: None,
                system: None,
                verified: None,
            },
            channel_id: ChannelId(555),
            guild_id: Some(GUILD),
        }
    }

    #[test]
    fn direct_messages_have_nowhere_to_report() {
        assert_eq!(report_target(None, Some(&enabled_config(200))), None);
    }

    #[test]
    fn a_guild_without_config_is_a_no_op() {
        assert_eq!(report_target(Some(GUILD), None), None);
    }

    #[test]
    fn a_disabled_config_is_a_no_op() {
        let config = ErrorLogConfig {
            enabled: false,
            channel_id: 200,
        };
        assert_eq!(report_target(Some(GUILD), Some(&config)), None);
    }

    #[test]
    fn an_unset_channel_is_a_no_op() {
        assert_eq!(report_target(Some(GUILD), Some(&enabled_config(0))), None);
    }

    #[test]
    fn an_enabled_config_yields_its_channel() {
        assert_eq!(
            report_target(Some(GUILD), Some(&enabled_config(200))),
            Some(ChannelId(200))
        );
    }

    #[test]
    fn toggling_off_between_failures_stops_the_second_report() {
        let before = enabled_config(200);
        assert!(report_target(Some(GUILD), Some(&before)).is_some());

        let after = ErrorLogConfig {
            enabled: false,
            ..before
        };
        assert!(report_target(Some(GUILD), Some(&after)).is_none());
    }

    #[test]
    fn the_report_names_author_kind_and_reason() {
        let error = CommandError::UnexpectedException(String::from("index out of bounds"));
        let embed = report_embed(&error, &message(None)).unwrap();

        let author = embed.author.unwrap();
        assert_eq!(author.name.unwrap(), "goodboy#0420");
        assert!(author.icon_url.is_none());
        assert_eq!(author.url.unwrap(), "https://discord.com/channels/100/555/777");

        let description = embed.description.unwrap();
        assert!(description.contains("UnexpectedException"));
        assert!(description.contains("index out of bounds"));
        assert!(embed.timestamp.is_some());
    }

    #[test]
    fn a_valid_avatar_makes_it_onto_the_report() {
        let error = CommandError::Unsuccessful(String::from("nope"));
        let embed = report_embed(&error, &message(Some("a_deadbeef"))).unwrap();

        let icon = embed.author.unwrap().icon_url.unwrap();
        assert!(icon.ends_with("a_deadbeef.gif"));
    }

    #[test]
    fn direct_messages_get_no_jump_link() {
        let mut msg = message(None);
        msg.guild_id = None;
        assert_eq!(jump_link(&msg), None);
    }
}
