use sqlx::PgPool;
use twilight_model::id::GuildId;

use crate::error::DatabaseError;

/// Per guild opt-in for forwarding escalated command failures to a channel.
/// A missing row, a disabled row and a row with channel 0 all mean the same
/// thing: nothing gets forwarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorLogConfig {
    pub enabled: bool,
    pub channel_id: i64,
}

/// Per guild opt-in for announcing nickname changes in a channel.
#[derive(Debug, Clone, PartialEq)]
pub struct NicknameAlertConfig {
    pub enabled: bool,
    pub channel_id: i64,
}

pub async fn get_error_log_config(pool: &PgPool, guild_id: GuildId) -> Result<Option<ErrorLogConfig>, DatabaseError> {
    let row: Option<(bool, i64)> = sqlx::query_as("SELECT enabled, channel_id FROM error_log_config WHERE guild_id=$1")
        .bind(guild_id.0 as i64)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(enabled, channel_id)| ErrorLogConfig { enabled, channel_id }))
}

pub async fn set_error_log_channel(pool: &PgPool, guild_id: GuildId, channel_id: u64) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO error_log_config (guild_id, enabled, channel_id) VALUES ($1, FALSE, $2)
         ON CONFLICT (guild_id) DO UPDATE SET channel_id=$2",
    )
    .bind(guild_id.0 as i64)
    .bind(channel_id as i64)
    .execute(pool)
    .await?;

    Ok(())
}

/// Flips the enabled flag, creating the row when the guild has none yet.
/// Returns the new state.
pub async fn toggle_error_log(pool: &PgPool, guild_id: GuildId) -> Result<bool, DatabaseError> {
    let row: (bool,) = sqlx::query_as(
        "INSERT INTO error_log_config (guild_id, enabled, channel_id) VALUES ($1, TRUE, 0)
         ON CONFLICT (guild_id) DO UPDATE SET enabled=NOT error_log_config.enabled
         RETURNING enabled",
    )
    .bind(guild_id.0 as i64)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}

pub async fn get_nickname_alert_config(
    pool: &PgPool,
    guild_id: GuildId,
) -> Result<Option<NicknameAlertConfig>, DatabaseError> {
    let row: Option<(bool, i64)> =
        sqlx::query_as("SELECT enabled, channel_id FROM nickname_alert_config WHERE guild_id=$1")
            .bind(guild_id.0 as i64)
            .fetch_optional(pool)
            .await?;

    Ok(row.map(|(enabled, channel_id)| NicknameAlertConfig { enabled, channel_id }))
}

pub async fn set_nickname_alert_channel(pool: &PgPool, guild_id: GuildId, channel_id: u64) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO nickname_alert_config (guild_id, enabled, channel_id) VALUES ($1, FALSE, $2)
         ON CONFLICT (guild_id) DO UPDATE SET channel_id=$2",
    )
    .bind(guild_id.0 as i64)
    .bind(channel_id as i64)
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn toggle_nickname_alert(pool: &PgPool, guild_id: GuildId) -> Result<bool, DatabaseError> {
    let row: (bool,) = sqlx::query_as(
        "INSERT INTO nickname_alert_config (guild_id, enabled, channel_id) VALUES ($1, TRUE, 0)
         ON CONFLICT (guild_id) DO UPDATE SET enabled=NOT nickname_alert_config.enabled
         RETURNING enabled",
    )
    .bind(guild_id.0 as i64)
    .fetch_one(pool)
    .await?;

    Ok(row.0)
}
