use std::time::Duration;

use log::{debug, info};
use tokio::runtime::Runtime;
use twilight_http::Client as HttpClient;

use git_version::git_version;

use crate::core::logging;
use crate::core::{BotConfig, PawBot};
use crate::error::StartupError;

mod commands;
mod core;
mod database;
mod error;
mod parser;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_VERSION: &str = git_version!(fallback = "unknown");

fn main() -> Result<(), StartupError> {
    let runtime = Runtime::new()?;

    runtime.block_on(async move { real_main().await })?;

    runtime.shutdown_timeout(Duration::from_secs(90));
    Ok(())
}

async fn real_main() -> Result<(), StartupError> {
    if let Err(e) = logging::initialize() {
        eprintln!("{}", e);
        return Err(e);
    }

    info!("PawBot v{} starting!", VERSION);
    // Read config file
    let config = BotConfig::new("config.toml")?;
    debug!("Loaded config file");

    let http = HttpClient::builder().token(&config.tokens.discord).build()?;

    // Validate token and figure out who we are
    let user = http.current_user().await?;
    info!(
        "Token validated, connecting to discord as {}#{}",
        user.name, user.discriminator
    );

    logging::initialize_discord_webhooks(http.clone(), &config, user.clone());

    pawbot_important!("Starting PawBot v{}. Time to look after the pack!", VERSION);

    //connect to the database
    let postgres_pool = sqlx::PgPool::connect(&config.database.postgres).await?;

    info!("Connected to postgres!");

    info!("Handling database migrations...");
    sqlx::migrate!("./migrations")
        .run(&postgres_pool)
        .await
        .expect("Failed to run database migrations!");

    info!("Finished migrations!");

    pawbot_info!("Database connection established");

    // end of the critical failure zone, everything from here on out should be properly wrapped
    // and handled

    if let Err(e) = PawBot::run(config, http, user, postgres_pool).await {
        pawbot_error!("Failed to start the bot: {}", e)
    }

    Ok(())
}
