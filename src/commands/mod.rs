use std::collections::HashMap;
use std::sync::Arc;

use lazy_static::lazy_static;

use crate::commands::meta::nodes::{CommandNode, RootNode};
use crate::{command, command_with_subcommands};

mod basic;
mod config;
pub mod meta;

lazy_static! {
    pub static ref ROOT_NODE: RootNode = RootNode::new(vec![
        command!("ping", basic::ping),
        command!("coinflip", basic::coinflip),
        command!("about", basic::about),
        command_with_subcommands!(
            "errorlog",
            command!("channel", config::errorlog_channel),
            command!("toggle", config::errorlog_toggle)
        ),
        command_with_subcommands!(
            "nicknamealert",
            command!("channel", config::nicknamealert_channel),
            command!("toggle", config::nicknamealert_toggle)
        ),
    ]);
}

#[cfg(test)]
mod tests {
    use super::ROOT_NODE;
    use crate::commands::meta::nodes::Resolution;

    #[test]
    fn the_registry_builds_and_knows_its_commands() {
        match ROOT_NODE.resolve("PING") {
            Resolution::Resolved(node) => assert_eq!(node.name, "ping"),
            _ => panic!("expected ping to resolve case insensitively"),
        }
    }

    #[test]
    fn config_groups_carry_their_subcommands() {
        let group = match ROOT_NODE.resolve("errorlog") {
            Resolution::Resolved(node) => node,
            _ => panic!("expected errorlog to resolve"),
        };
        assert!(group.handler.is_none());
        assert!(matches!(group.resolve_sub("toggle"), Resolution::Resolved(_)));
        assert!(matches!(group.resolve_sub("channel"), Resolution::Resolved(_)));
    }

    #[test]
    fn unknown_names_do_not_resolve() {
        assert!(matches!(ROOT_NODE.resolve("nonexistentcmd"), Resolution::NotFound));
    }
}
