use std::sync::Arc;

use futures_util::StreamExt;
use log::debug;
use sqlx::PgPool;
use twilight_gateway::cluster::{Cluster, ShardScheme};
use twilight_gateway::Event;
use twilight_http::Client as HttpClient;
use twilight_model::gateway::Intents;
use twilight_model::user::CurrentUser;

use crate::core::handlers::{alerts, commands, general};
use crate::core::{BotConfig, BotContext};
use crate::error::{EventHandlerError, StartupError};
use crate::{pawbot_error, pawbot_info};

pub struct PawBot;

impl PawBot {
    pub async fn run(
        config: BotConfig,
        http: HttpClient,
        bot_user: CurrentUser,
        pool: PgPool,
    ) -> Result<(), StartupError> {
        let intents = Intents::GUILDS
            | Intents::GUILD_MEMBERS
            | Intents::GUILD_MESSAGES
            | Intents::DIRECT_MESSAGES;

        let (cluster, mut events) = Cluster::builder(&config.tokens.discord, intents)
            .shard_scheme(ShardScheme::Auto)
            .build()
            .await?;

        let context = Arc::new(BotContext::new(
            cluster.clone(),
            http,
            bot_user,
            pool,
            config.command.prefix.clone(),
        ));

        pawbot_info!("The cluster is going online!");
        cluster.up().await;

        {
            let cluster = cluster.clone();
            ctrlc::set_handler(move || {
                cluster.down();
                std::process::exit(0);
            })?;
        }

        while let Some((shard_id, event)) = events.next().await {
            let context = context.clone();
            tokio::spawn(async move {
                if let Err(e) = handle_event(shard_id, event, context).await {
                    pawbot_error!("{}", e);
                }
            });
        }

        Ok(())
    }
}

async fn handle_event(shard_id: u64, event: Event, ctx: Arc<BotContext>) -> Result<(), EventHandlerError> {
    debug!("Got a {:?} event on shard {}", event.kind(), shard_id);

    general::handle_event(shard_id, &event).await?;
    alerts::handle_event(&event, &ctx).await?;
    commands::handle_event(event, ctx).await?;

    Ok(())
}
