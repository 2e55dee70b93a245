use std::collections::HashMap;
use std::sync::RwLock as StdRwLock;

use sqlx::PgPool;
use tokio::sync::RwLock;
use twilight_gateway::Cluster;
use twilight_http::Client as HttpClient;
use twilight_model::channel::Message;
use twilight_model::id::{GuildId, UserId};
use twilight_model::user::CurrentUser;

use crate::database::configs::{self, ErrorLogConfig, NicknameAlertConfig};
use crate::error::DatabaseError;

pub struct BotContext {
    pub cluster: Cluster,
    pub http: HttpClient,
    pub bot_user: CurrentUser,
    pub pool: PgPool,
    // Read fresh on every dispatch so a config change takes effect on the
    // next message without a restart.
    command_prefix: RwLock<String>,
    // Last seen nicknames, so a member update can tell what changed.
    nicknames: StdRwLock<HashMap<(GuildId, UserId), Option<String>>>,
}

impl BotContext {
    pub fn new(cluster: Cluster, http: HttpClient, bot_user: CurrentUser, pool: PgPool, prefix: String) -> Self {
        BotContext {
            cluster,
            http,
            bot_user,
            pool,
            command_prefix: RwLock::new(prefix),
            nicknames: StdRwLock::new(HashMap::new()),
        }
    }

    /// Returns if a message was sent by us.
    pub fn is_own(&self, other: &Message) -> bool {
        self.bot_user.id == other.author.id
    }

    pub async fn command_prefix(&self) -> String {
        self.command_prefix.read().await.clone()
    }

    pub async fn set_command_prefix(&self, prefix: String) {
        *self.command_prefix.write().await = prefix;
    }

    /// Stores the nickname we now know for a member and hands back what we
    /// knew before, if anything.
    pub fn remember_nickname(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        nickname: Option<String>,
    ) -> Option<Option<String>> {
        let mut nicknames = self.nicknames.write().unwrap();
        nicknames.insert((guild_id, user_id), nickname)
    }

    pub fn forget_guild(&self, guild_id: GuildId) {
        let mut nicknames = self.nicknames.write().unwrap();
        nicknames.retain(|(guild, _), _| *guild != guild_id);
    }

    pub async fn get_error_log_config(&self, guild_id: GuildId) -> Result<Option<ErrorLogConfig>, DatabaseError> {
        configs::get_error_log_config(&self.pool, guild_id).await
    }

    pub async fn get_nickname_alert_config(
        &self,
        guild_id: GuildId,
    ) -> Result<Option<NicknameAlertConfig>, DatabaseError> {
        configs::get_nickname_alert_config(&self.pool, guild_id).await
    }
}
