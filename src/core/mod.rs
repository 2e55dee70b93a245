pub use bot::PawBot;
pub use bot_config::BotConfig;
pub use command_context::{CommandContext, CommandMessage};
pub use context::BotContext;

mod bot;
mod bot_config;
mod command_context;
mod context;
pub mod handlers;
pub mod logging;
pub mod reporter;
