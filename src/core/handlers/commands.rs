use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use log::{error, trace, warn};
use twilight_gateway::Event;
use twilight_model::channel::message::MessageType;
use twilight_model::id::{ChannelId, UserId};

use crate::commands::meta::nodes::Resolution;
use crate::commands::ROOT_NODE;
use crate::core::{reporter, BotContext, CommandContext, CommandMessage};
use crate::error::{CommandError, CommandResult, EventHandlerError, MessageError};
use crate::parser::Parser;

const DEFAULT_PREFIX: &str = ".";

/// Entry point for every inbound message. Decides whether it is addressed to
/// us, runs it, and deals with the fallout when it fails.
pub async fn handle_event(event: Event, ctx: Arc<BotContext>) -> Result<(), EventHandlerError> {
    if let Event::MessageCreate(msg) = event {
        // Only regular messages written by real people get to run commands.
        if msg.0.kind != MessageType::Regular
            || msg.0.author.bot
            || msg.0.webhook_id.is_some()
            || ctx.is_own(&msg.0)
        {
            return Ok(());
        }
        trace!("Received a message from {}, saying {}", msg.0.author.name, msg.0.content);

        let configured = ctx.command_prefix().await;
        let (prefix, defaulted) = effective_prefix(&configured);
        if defaulted {
            warn!("Defaulting to prefix '{}' since no prefix is configured!", prefix);
        }

        let stripped = match match_prefix(&msg.0.content, prefix, ctx.bot_user.id) {
            Some(stripped) => stripped.to_owned(),
            // Just a regular message, none of our business.
            None => return Ok(()),
        };

        let message = CommandMessage {
            id: msg.0.id,
            content: msg.0.content.clone(),
            author: msg.0.author.clone(),
            channel_id: msg.0.channel_id,
            guild_id: msg.0.guild_id,
        };

        dispatch(ctx, message, &stripped).await;
    }

    Ok(())
}

/// The prefix to honor for this one dispatch. Nothing is cached, a fixed
/// config starts working on the very next message.
fn effective_prefix(configured: &str) -> (&str, bool) {
    if configured.is_empty() {
        (DEFAULT_PREFIX, true)
    } else {
        (configured, false)
    }
}

/// A message is a command when it leads with the active prefix or with a
/// mention of our own user, in either form discord renders those.
fn match_prefix<'a>(content: &'a str, prefix: &str, bot_id: UserId) -> Option<&'a str> {
    if let Some(stripped) = content.strip_prefix(prefix) {
        return Some(stripped);
    }

    let mention = format!("<@{}>", bot_id);
    let nick_mention = format!("<@!{}>", bot_id);
    if let Some(stripped) = content.strip_prefix(&mention) {
        Some(stripped)
    } else if let Some(stripped) = content.strip_prefix(&nick_mention) {
        Some(stripped)
    } else {
        None
    }
}

async fn dispatch(ctx: Arc<BotContext>, message: CommandMessage, text: &str) {
    let outcome = run_command(ctx.clone(), message.clone(), text).await;

    if let Err(error) = outcome {
        // The invoker always hears back, before anything else happens with
        // this failure.
        if let Err(e) = notify_invoker(&ctx, message.channel_id, error.user_notice()).await {
            error!(
                "Failed to deliver a failure notice in channel {}: {}",
                message.channel_id, e
            );
        }

        error!("{}: {}", error.kind_name(), error);

        if error.escalates() {
            // Fire and forget: the report makes its own way or it doesn't,
            // the dispatch is done either way.
            tokio::spawn(async move {
                reporter::report(ctx, error, message).await;
            });
        }
    }
}

/// Resolves and invokes the command, exactly once. A panicking handler is
/// caught here and turned into an outcome like any other failure.
async fn run_command(ctx: Arc<BotContext>, message: CommandMessage, text: &str) -> CommandResult {
    let mut parser = Parser::new(text);

    let name = match parser.next_word() {
        Some(name) => name,
        None => return Err(CommandError::UnknownCommand(String::from("no command name was provided"))),
    };

    let mut node = match ROOT_NODE.resolve(&name) {
        Resolution::Resolved(node) => node,
        Resolution::Ambiguous(candidates) => return Err(CommandError::MultipleMatches(candidates)),
        Resolution::NotFound => return Err(CommandError::UnknownCommand(format!("no command named ``{}``", name))),
    };

    // Descend into subcommands for as long as the next word matches one.
    while !node.sub_nodes.is_empty() {
        let next = match parser.peek() {
            Some(next) => next.to_owned(),
            None => break,
        };

        match node.resolve_sub(&next) {
            Resolution::Resolved(sub) => {
                parser.next_word();
                node = sub;
            }
            Resolution::Ambiguous(candidates) => return Err(CommandError::MultipleMatches(candidates)),
            Resolution::NotFound => break,
        }
    }

    let handler = match &node.handler {
        Some(handler) => handler,
        None => {
            let subcommands = node
                .node_list
                .iter()
                .map(|sub| sub.name.as_str())
                .collect::<Vec<&str>>()
                .join(", ");
            return Err(CommandError::UnknownCommand(format!(
                "``{}`` needs one of its subcommands: {}",
                node.name, subcommands
            )));
        }
    };

    trace!("Executing command: {}", node.name);

    let invocation = handler(CommandContext::new(ctx, message, parser));
    match AssertUnwindSafe(invocation).catch_unwind().await {
        Ok(outcome) => outcome,
        Err(payload) => Err(classify_panic(payload)),
    }
}

async fn notify_invoker(ctx: &BotContext, channel_id: ChannelId, notice: String) -> Result<(), MessageError> {
    ctx.http.create_message(channel_id).content(notice)?.await?;
    Ok(())
}

fn classify_panic(payload: Box<dyn Any + Send>) -> CommandError {
    if let Some(reason) = payload.downcast_ref::<&str>() {
        CommandError::UnexpectedException((*reason).to_string())
    } else if let Some(reason) = payload.downcast_ref::<String>() {
        CommandError::UnexpectedException(reason.clone())
    } else {
        CommandError::Unclassified(String::from("a command handler failed in a way it could not describe"))
    }
}

#[cfg(test)]
mod tests {
    use twilight_model::id::UserId;

    use super::{classify_panic, effective_prefix, match_prefix, DEFAULT_PREFIX};
    use crate::error::CommandError;

    const BOT: UserId = UserId(9000);

    #[test]
    fn the_active_prefix_marks_a_command() {
        assert_eq!(match_prefix(".ping", ".", BOT), Some("ping"));
        assert_eq!(match_prefix("~ping extra words", "~", BOT), Some("ping extra words"));
    }

    #[test]
    fn either_mention_form_works_in_place_of_the_prefix() {
        assert_eq!(match_prefix("<@9000>ping", ".", BOT), Some("ping"));
        assert_eq!(match_prefix("<@!9000> ping", ".", BOT), Some(" ping"));
    }

    #[test]
    fn everything_else_is_silently_ignored() {
        assert_eq!(match_prefix("just chatting", ".", BOT), None);
        assert_eq!(match_prefix("<@1234> not for us", ".", BOT), None);
        assert_eq!(match_prefix("ping", ".", BOT), None);
    }

    #[test]
    fn an_empty_prefix_falls_back_to_the_default() {
        assert_eq!(effective_prefix(""), (DEFAULT_PREFIX, true));
        assert_eq!(effective_prefix("!"), ("!", false));
        // Re-evaluated per call, a fixed config wins immediately.
        assert_eq!(effective_prefix("."), (".", false));
    }

    #[test]
    fn string_panics_become_unexpected_exceptions() {
        match classify_panic(Box::new("the handler fell over")) {
            CommandError::UnexpectedException(reason) => assert_eq!(reason, "the handler fell over"),
            other => panic!("expected UnexpectedException, got {:?}", other),
        }

        match classify_panic(Box::new(String::from("owned flavor"))) {
            CommandError::UnexpectedException(reason) => assert_eq!(reason, "owned flavor"),
            other => panic!("expected UnexpectedException, got {:?}", other),
        }
    }

    #[test]
    fn other_panic_payloads_stay_unclassified() {
        assert!(matches!(classify_panic(Box::new(42_u32)), CommandError::Unclassified(_)));
    }
}
