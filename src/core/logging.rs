use std::io;
use std::sync::RwLock;
use std::time::Duration;

use flexi_logger::writers::LogWriter;
use flexi_logger::{
    colored_opt_format, Age, Cleanup, Criterion, DeferredNow, Duplicate, Logger, Naming, ReconfigurationHandle,
};
use lazy_static::lazy_static;
use log::{Level, LevelFilter, Record};
use once_cell::sync::OnceCell;
use twilight_http::Client as HttpClient;
use twilight_model::user::CurrentUser;

use crate::core::BotConfig;
use crate::error::StartupError;
use crate::pawbot_error;

static LOGGER_HANDLE: OnceCell<ReconfigurationHandle> = OnceCell::new();
static BOT_USER: OnceCell<CurrentUser> = OnceCell::new();

pub const DISCORD_AVATAR_URL: &str = "https://cdn.discordapp.com/avatars/";

lazy_static! {
    pub static ref INFO_QUEUE: RwLock<Vec<String>> = RwLock::new(Vec::new());
}
lazy_static! {
    pub static ref IMPORTANT_QUEUE: RwLock<Vec<String>> = RwLock::new(Vec::new());
}

pub fn initialize() -> Result<(), StartupError> {
    let important = WebhookLogger {
        queue: &IMPORTANT_QUEUE,
    };

    let pawbot_important = Box::new(important);

    let pawbot_info = Box::new(WebhookLogger { queue: &INFO_QUEUE });

    let log_init_status = LOGGER_HANDLE.set(
        Logger::with_env_or_str("info")
            .duplicate_to_stderr(Duplicate::Debug)
            .log_to_file()
            .directory("logs")
            .format(colored_opt_format)
            .rotate(
                Criterion::Age(Age::Day),
                Naming::Timestamps,
                Cleanup::KeepLogAndZipFiles(10, 30),
            )
            .add_writer("pawbot_important", pawbot_important)
            .add_writer("pawbot_info", pawbot_info)
            .start_with_specfile("logconfig.toml")
            .map_err(|_| StartupError::NoLoggingSpec)?,
    );

    if log_init_status.is_err() {
        pawbot_error!("The logging system was attempted to be initialized a second time!");
    }

    Ok(())
}

pub fn initialize_discord_webhooks(http: HttpClient, config: &BotConfig, user: CurrentUser) {
    if BOT_USER.set(user).is_err() {
        pawbot_error!("The webhook loggers were attempted to be initialized a second time!");
        return;
    }

    run(http.clone(), &IMPORTANT_QUEUE, config.logging.important_logs.to_owned());
    run(http, &INFO_QUEUE, config.logging.info_logs.to_owned());
}

struct WebhookLogger {
    queue: &'static RwLock<Vec<String>>,
}

impl LogWriter for WebhookLogger {
    fn write(&self, now: &mut DeferredNow, record: &Record) -> Result<(), io::Error> {
        let timestamp = now.now().naive_utc().format("%Y-%m-%d %H:%M:%S");
        let log_emote = get_emote(record.level());
        let log_info = &record.args();

        self.queue
            .write()
            .unwrap()
            .push(format!("``[{}]`` {} {}", timestamp, log_emote, log_info));

        Ok(())
    }

    fn flush(&self) -> Result<(), io::Error> {
        Ok(())
    }

    fn max_log_level(&self) -> LevelFilter {
        LevelFilter::Info
    }
}

pub fn run(http: HttpClient, queue: &'static RwLock<Vec<String>>, url: String) {
    tokio::spawn(async move {
        loop {
            let out = {
                let mut todo = queue.write().unwrap();

                let mut out = vec![];
                let mut count = 0;
                while let Some(s) = todo.first() {
                    if count + s.len() < 2000 {
                        count += s.len() + 1;
                        out.push(todo.remove(0));
                    } else {
                        break;
                    }
                }
                out
            };

            if !out.is_empty() {
                let message = out.join("\n");
                match send_webhook(&http, &url, message.clone()).await {
                    Ok(_) => {}
                    Err(e) => {
                        if e.to_string().contains("429") {
                            queue.write().unwrap().insert(0, message);
                            tokio::time::sleep(Duration::new(1, 0)).await;
                        }
                    }
                }
            }
            tokio::time::sleep(Duration::new(1, 0)).await;
        }
    });
}

async fn send_webhook(http: &HttpClient, url: &str, message: String) -> Result<(), twilight_http::Error> {
    let user = BOT_USER.get().unwrap();
    let executor = http.execute_webhook_from_url(url)?.content(message).username(&user.name);

    match &user.avatar {
        Some(avatar) => executor.avatar_url(format!("{}{}/{}.png", DISCORD_AVATAR_URL, &user.id, avatar)),
        None => executor,
    }
    .await
    .map(|_| ())
}

fn get_emote(level: Level) -> &'static str {
    match level {
        Level::Error => ":no_entry:",
        Level::Warn => ":warning:",
        _ => ":information_source:", // never sent to discord so the rest doesn't matter
    }
}

#[macro_use]
pub mod macros {
    #[macro_export]
    macro_rules! pawbot_info {
        ($($arg:tt)*) => (
            log::info!(target: "{pawbot_info,_Default}", $($arg)*)
        )
    }

    #[macro_export]
    macro_rules! pawbot_important {
        ($($arg:tt)*) => (
            log::info!(target: "{pawbot_important,pawbot_info,_Default}", $($arg)*)
        )
    }

    #[macro_export]
    macro_rules! pawbot_error {
        ($($arg:tt)*) => (
            log::error!(target: "{pawbot_important,pawbot_info,_Default}", $($arg)*)
        )
    }

    #[macro_export]
    macro_rules! pawbot_warn {
        ($($arg:tt)*) => (
            log::warn!(target: "{pawbot_important,pawbot_info,_Default}", $($arg)*)
        )
    }
}
