pub mod nodes;

#[macro_use]
pub mod macros {
    #[macro_export]
    macro_rules! command_with_aliases {
        ($name: literal, $a: expr, $e: expr) => {{
            Arc::new(CommandNode {
                name: String::from($name),
                aliases: $a,
                handler: Some(Box::new(move |ctx| Box::pin($e(ctx)))),
                sub_nodes: HashMap::new(),
                node_list: vec![],
            })
        }};
    }

    #[macro_export]
    macro_rules! command {
        ($name: literal, $e: expr) => {
            $crate::command_with_aliases!($name, vec![], $e)
        };
    }

    #[macro_export]
    macro_rules! command_with_subcommands {
        ($name: literal, $($node: expr),*) => {
        {
        let mut map = ::std::collections::HashMap::new();
        let mut list = vec![];
         $(
         let node = $node;
         for a in &node.aliases {
            let key = a.to_lowercase();
            if map.contains_key(&key) {
                panic!("Tried to register subcommand alias {} but a subcommand is already registered under this name", a);
            }
            map.insert(key, node.clone());
         }
         let key = node.name.to_lowercase();
         if map.contains_key(&key) {
            panic!("Tried to register subcommand {} but a subcommand is already registered under this name", &node.name)
         }
         map.insert(key, node.clone());
         list.push(node);
         )*
        Arc::new(CommandNode {
                name: String::from($name),
                aliases: vec![],
                handler: None,
                sub_nodes: map,
                node_list: list,
            })
        }
        }
    }
}
