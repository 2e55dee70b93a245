use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::core::CommandContext;
use crate::error::CommandResult;

pub type CommandResultOuter = Pin<Box<dyn Future<Output = CommandResult> + Send>>;
pub type CommandHandler = Box<dyn Fn(CommandContext) -> CommandResultOuter + Send + Sync>;

pub struct RootNode {
    pub all_commands: HashMap<String, Arc<CommandNode>>,
    pub command_list: Vec<Arc<CommandNode>>,
}

pub struct CommandNode {
    pub name: String,
    pub aliases: Vec<String>,
    pub handler: Option<CommandHandler>,
    pub sub_nodes: HashMap<String, Arc<CommandNode>>,
    pub node_list: Vec<Arc<CommandNode>>,
}

/// Outcome of a registry lookup. An abbreviated name that several commands
/// share is ambiguous and gets reported as such, never resolved by priority.
pub enum Resolution {
    Resolved(Arc<CommandNode>),
    Ambiguous(Vec<String>),
    NotFound,
}

impl RootNode {
    /// Builds the top level command map. Names and aliases share one case
    /// insensitive namespace, claiming a taken one is a startup bug.
    pub fn new(commands: Vec<Arc<CommandNode>>) -> Self {
        let mut all_commands = HashMap::new();
        let mut command_list = vec![];

        for command in commands {
            for alias in &command.aliases {
                let key = alias.to_lowercase();
                if all_commands.contains_key(&key) {
                    panic!(
                        "Tried to register command alias {} but a command is already registered under this name",
                        alias
                    );
                }
                all_commands.insert(key, command.clone());
            }

            let key = command.name.to_lowercase();
            if all_commands.contains_key(&key) {
                panic!(
                    "Tried to register command {} but a command is already registered under this name",
                    command.name
                );
            }
            all_commands.insert(key, command.clone());
            command_list.push(command);
        }

        RootNode {
            all_commands,
            command_list,
        }
    }

    pub fn resolve(&self, name: &str) -> Resolution {
        resolve_in(&self.all_commands, name)
    }
}

impl CommandNode {
    pub fn resolve_sub(&self, name: &str) -> Resolution {
        resolve_in(&self.sub_nodes, name)
    }
}

fn resolve_in(map: &HashMap<String, Arc<CommandNode>>, name: &str) -> Resolution {
    let lowered = name.to_lowercase();

    if let Some(node) = map.get(&lowered) {
        return Resolution::Resolved(node.clone());
    }

    // No exact hit, see if the input is the unique start of something.
    let mut candidates: Vec<&Arc<CommandNode>> = map
        .iter()
        .filter(|(key, _)| key.starts_with(&lowered))
        .map(|(_, node)| node)
        .collect();
    candidates.sort_by(|a, b| a.name.cmp(&b.name));
    candidates.dedup_by(|a, b| a.name == b.name);

    match candidates.len() {
        0 => Resolution::NotFound,
        1 => Resolution::Resolved(candidates[0].clone()),
        _ => Resolution::Ambiguous(candidates.into_iter().map(|node| node.name.clone()).collect()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use super::{CommandNode, Resolution, RootNode};

    fn node(name: &str, aliases: Vec<&str>) -> Arc<CommandNode> {
        Arc::new(CommandNode {
            name: name.to_string(),
            aliases: aliases.into_iter().map(String::from).collect(),
            handler: None,
            sub_nodes: HashMap::new(),
            node_list: vec![],
        })
    }

    #[test]
    fn lookups_ignore_case() {
        let root = RootNode::new(vec![node("ping", vec![])]);
        match root.resolve("PiNg") {
            Resolution::Resolved(found) => assert_eq!(found.name, "ping"),
            _ => panic!("expected ping to resolve"),
        }
    }

    #[test]
    fn aliases_resolve_to_their_node() {
        let root = RootNode::new(vec![node("nicknamealert", vec!["nickalert"])]);
        match root.resolve("nickalert") {
            Resolution::Resolved(found) => assert_eq!(found.name, "nicknamealert"),
            _ => panic!("expected the alias to resolve"),
        }
    }

    #[test]
    fn unique_abbreviations_resolve() {
        let root = RootNode::new(vec![node("ping", vec![]), node("about", vec![])]);
        match root.resolve("ab") {
            Resolution::Resolved(found) => assert_eq!(found.name, "about"),
            _ => panic!("expected the unique abbreviation to resolve"),
        }
    }

    #[test]
    fn shared_abbreviations_are_ambiguous() {
        let root = RootNode::new(vec![node("coinflip", vec![]), node("config", vec![])]);
        match root.resolve("co") {
            Resolution::Ambiguous(candidates) => {
                assert_eq!(candidates, vec![String::from("coinflip"), String::from("config")])
            }
            _ => panic!("expected an ambiguous resolution"),
        }
    }

    #[test]
    fn a_name_and_alias_of_one_node_are_not_ambiguous() {
        let root = RootNode::new(vec![node("nicknamealert", vec!["nickalert"])]);
        match root.resolve("nick") {
            Resolution::Resolved(found) => assert_eq!(found.name, "nicknamealert"),
            _ => panic!("one node matching through both its names is still unique"),
        }
    }

    #[test]
    fn unknown_names_are_not_found() {
        let root = RootNode::new(vec![node("ping", vec![])]);
        assert!(matches!(root.resolve("zoomies"), Resolution::NotFound));
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn duplicate_names_panic_at_startup() {
        RootNode::new(vec![node("ping", vec![]), node("PING", vec![])]);
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn aliases_collide_with_names_too() {
        RootNode::new(vec![node("ping", vec![]), node("pong", vec!["ping"])]);
    }
}
