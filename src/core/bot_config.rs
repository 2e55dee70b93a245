use std::fs;

use serde::Deserialize;

use crate::error::StartupError;

#[derive(Deserialize, Debug)]
pub struct BotConfig {
    pub tokens: Tokens,
    pub logging: Logging,
    pub database: Database,
    #[serde(default)]
    pub command: CommandSettings,
}

#[derive(Deserialize, Debug)]
pub struct Tokens {
    pub discord: String,
}

#[derive(Deserialize, Debug)]
pub struct Logging {
    pub important_logs: String,
    pub info_logs: String,
}

#[derive(Deserialize, Debug)]
pub struct Database {
    pub postgres: String,
}

/// An empty prefix is allowed here, the dispatcher falls back to its default
/// and complains about it on every message until someone fixes the config.
#[derive(Deserialize, Debug, Default)]
pub struct CommandSettings {
    #[serde(default)]
    pub prefix: String,
}

impl BotConfig {
    pub fn new(filename: &str) -> Result<Self, StartupError> {
        let config_file = fs::read_to_string(filename).map_err(|_| StartupError::NoConfig)?;
        match toml::from_str(&config_file) {
            Err(_) => Err(StartupError::InvalidConfig),
            Ok(c) => Ok(c),
        }
    }
}
