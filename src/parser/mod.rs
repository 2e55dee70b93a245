use twilight_model::id::ChannelId;

use crate::error::CommandError;

/// Cursor over the whitespace separated parts of a command invocation, fed
/// to the handler once the command name itself has been consumed.
#[derive(Debug, Clone)]
pub struct Parser {
    parts: Vec<String>,
    index: usize,
}

impl Parser {
    pub fn new(content: &str) -> Self {
        Parser {
            parts: content
                .split_whitespace()
                .map(std::borrow::ToOwned::to_owned)
                .collect::<Vec<String>>(),
            index: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.index < self.parts.len()
    }

    pub fn peek(&self) -> Option<&str> {
        self.parts.get(self.index).map(String::as_str)
    }

    /// Consumes the next part, without any requirement that one exists.
    pub fn next_word(&mut self) -> Option<String> {
        let part = self.parts.get(self.index).cloned();
        if part.is_some() {
            self.index += 1;
        }
        part
    }

    /// Consumes the next part, failing the command when none is left.
    pub fn get_next(&mut self) -> Result<String, CommandError> {
        self.next_word()
            .ok_or_else(|| CommandError::BadArgumentCount(String::from("The input text has too few arguments")))
    }

    /// Reads a channel argument, either a ``<#id>`` mention or a raw id.
    pub fn get_channel_id(&mut self) -> Result<ChannelId, CommandError> {
        let input = self.get_next()?;
        let raw = input
            .strip_prefix("<#")
            .and_then(|rest| rest.strip_suffix('>'))
            .unwrap_or(&input);

        match raw.parse::<u64>() {
            Ok(id) if id > 0 => Ok(ChannelId(id)),
            _ => Err(CommandError::ParseFailure(format!(
                "``{}`` is not a channel mention or channel id",
                input
            ))),
        }
    }

    /// For commands with a fixed argument list: leftovers fail the command
    /// instead of being silently dropped.
    pub fn expect_done(&self) -> Result<(), CommandError> {
        if self.has_next() {
            Err(CommandError::BadArgumentCount(String::from(
                "The input text has too many arguments",
            )))
        } else {
            Ok(())
        }
    }

    /// Everything not consumed yet, rejoined. Empty when exhausted.
    pub fn remainder(&self) -> String {
        self.parts[self.index..].join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::Parser;
    use crate::error::CommandError;

    #[test]
    fn splits_on_whitespace() {
        let mut parser = Parser::new("nicknamealert   channel <#1234>");
        assert_eq!(parser.next_word().as_deref(), Some("nicknamealert"));
        assert_eq!(parser.next_word().as_deref(), Some("channel"));
        assert_eq!(parser.remainder(), "<#1234>");
    }

    #[test]
    fn running_out_of_arguments_is_a_bad_argument_count() {
        let mut parser = Parser::new("");
        match parser.get_next() {
            Err(CommandError::BadArgumentCount(_)) => {}
            other => panic!("expected BadArgumentCount, got {:?}", other),
        }
    }

    #[test]
    fn channel_arguments_accept_mentions_and_raw_ids() {
        let mut parser = Parser::new("<#1234> 5678");
        assert_eq!(parser.get_channel_id().unwrap().0, 1234);
        assert_eq!(parser.get_channel_id().unwrap().0, 5678);
    }

    #[test]
    fn leftover_arguments_are_a_bad_argument_count() {
        let mut parser = Parser::new("<#1234> surprise");
        parser.get_channel_id().unwrap();
        match parser.expect_done() {
            Err(CommandError::BadArgumentCount(_)) => {}
            other => panic!("expected BadArgumentCount, got {:?}", other),
        }
    }

    #[test]
    fn garbage_channel_arguments_are_parse_failures() {
        let mut parser = Parser::new("#general");
        match parser.get_channel_id() {
            Err(CommandError::ParseFailure(_)) => {}
            other => panic!("expected ParseFailure, got {:?}", other),
        }
    }
}
