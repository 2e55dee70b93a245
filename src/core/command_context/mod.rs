use std::sync::Arc;

use twilight_model::id::{ChannelId, GuildId, MessageId};
use twilight_model::user::{CurrentUser, User};

use crate::core::BotContext;
use crate::error::CommandError;
use crate::parser::Parser;

mod messaging;

/// The slice of an inbound message a command needs to run: who asked, where,
/// and the raw text. Owned for the duration of one dispatch.
#[derive(Debug, Clone)]
pub struct CommandMessage {
    pub id: MessageId,
    pub content: String,
    pub author: User,
    pub channel_id: ChannelId,
    pub guild_id: Option<GuildId>,
}

/// Everything a command handler gets to work with.
pub struct CommandContext {
    pub bot_context: Arc<BotContext>,
    pub message: CommandMessage,
    pub parser: Parser,
}

impl CommandContext {
    pub fn new(ctx: Arc<BotContext>, message: CommandMessage, parser: Parser) -> Self {
        CommandContext {
            bot_context: ctx,
            message,
            parser,
        }
    }

    pub fn get_bot_user(&self) -> &CurrentUser {
        &self.bot_context.bot_user
    }

    /// Guild the command was used in. Commands that configure a guild call
    /// this first, using them in DMs is a failed precondition.
    pub fn get_guild(&self) -> Result<GuildId, CommandError> {
        self.message
            .guild_id
            .ok_or_else(|| CommandError::UnmetPrecondition(String::from("this command can only be used in a server")))
    }
}
