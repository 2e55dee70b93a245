use twilight_model::{
    channel::{embed::Embed, Message},
    id::{ChannelId, MessageId},
};

use super::CommandContext;
use crate::error::MessageError;

impl CommandContext {
    pub async fn send_message_raw(
        &self,
        message: impl Into<String>,
        channel_id: ChannelId,
    ) -> Result<Message, MessageError> {
        let sent_msg_handle = self
            .bot_context
            .http
            .create_message(channel_id)
            .content(message)?
            .await?;

        Ok(sent_msg_handle)
    }

    pub async fn reply_raw(&self, message: impl Into<String>) -> Result<Message, MessageError> {
        self.send_message_raw(message, self.message.channel_id).await
    }

    pub async fn reply_embed(&self, embed: Embed) -> Result<Message, MessageError> {
        let sent_embed_handle = self
            .bot_context
            .http
            .create_message(self.message.channel_id)
            .embed(embed)?
            .await?;

        Ok(sent_embed_handle)
    }

    pub async fn update_message(
        &self,
        updated_content: impl Into<String>,
        channel_id: ChannelId,
        msg_id: MessageId,
    ) -> Result<Message, MessageError> {
        let updated_message_handle = self
            .bot_context
            .http
            .update_message(channel_id, msg_id)
            .content(updated_content.into())?
            .await?;

        Ok(updated_message_handle)
    }
}
