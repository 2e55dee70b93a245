use rand::Rng;

use crate::core::CommandContext;
use crate::error::CommandResult;

pub async fn coinflip(ctx: CommandContext) -> CommandResult {
    let thing_todo = ctx.parser.remainder();

    let message_text = if thing_todo.is_empty() {
        if rand::thread_rng().gen_bool(0.5) {
            String::from("Heads!")
        } else {
            String::from("Tails!")
        }
    } else if rand::thread_rng().gen_bool(0.5) {
        format!("Yes, you should absolutely {}", thing_todo)
    } else {
        format!("No, you should probably not {}", thing_todo)
    };

    ctx.reply_raw(message_text).await?;

    Ok(())
}
