//! JSON output formatting

use std::io;

use serde::Serialize;

use crate::selection::{CheckState, SelectionTree};

use super::utils::visible_children;

/// Visible part of a selection tree, as exported to JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum JsonNode {
    File {
        name: String,
        state: CheckState,
    },
    Dir {
        name: String,
        state: CheckState,
        children: Vec<JsonNode>,
    },
}

impl JsonNode {
    pub fn name(&self) -> &str {
        match self {
            JsonNode::File { name, .. } | JsonNode::Dir { name, .. } => name,
        }
    }
}

/// Convert the checked and partially checked nodes of `tree` to `JsonNode`s.
///
/// The root is always exported as a directory.
pub fn to_json(tree: &SelectionTree) -> JsonNode {
    // Pre-order over visible nodes; building in reverse finishes every
    // child before its parent.
    let mut order = Vec::new();
    let mut stack = vec![tree.root()];
    while let Some(id) = stack.pop() {
        order.push(id);
        stack.extend(visible_children(tree, id).into_iter().rev());
    }

    let mut built: Vec<Option<JsonNode>> = vec![None; tree.node_count()];
    for &id in order.iter().rev() {
        let node = if tree.is_container(id) || id == tree.root() {
            let children = visible_children(tree, id)
                .into_iter()
                .filter_map(|child| built[child.index()].take())
                .collect();
            JsonNode::Dir {
                name: tree.label(id).to_string(),
                state: tree.state(id),
                children,
            }
        } else {
            JsonNode::File {
                name: tree.label(id).to_string(),
                state: tree.state(id),
            }
        };
        built[id.index()] = Some(node);
    }

    built[tree.root().index()].take().unwrap_or(JsonNode::Dir {
        name: tree.label(tree.root()).to_string(),
        state: tree.state(tree.root()),
        children: Vec::new(),
    })
}

/// Print the selected tree as pretty-printed JSON to stdout.
pub fn print_json(tree: &SelectionTree) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&to_json(tree)).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn project() -> SelectionTree {
        let mut tree = SelectionTree::new("proj");
        let src = tree.add_child(tree.root(), "src", true);
        tree.add_child(src, "a.go", false);
        let b = tree.add_child(src, "b.go", false);
        tree.add_child(tree.root(), "README.md", false);
        tree.set_checked(b, false);
        tree
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(to_json(&project())).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "dir",
                "name": "proj",
                "state": "indeterminate",
                "children": [
                    {
                        "type": "dir",
                        "name": "src",
                        "state": "indeterminate",
                        "children": [
                            { "type": "file", "name": "a.go", "state": "checked" }
                        ]
                    },
                    { "type": "file", "name": "README.md", "state": "checked" }
                ]
            })
        );
    }

    #[test]
    fn test_json_omits_unchecked_nodes() {
        let tree = project();
        let text = serde_json::to_string(&to_json(&tree)).unwrap();
        assert!(!text.contains("b.go"));
        assert!(!text.contains("unchecked"));
    }

    #[test]
    fn test_root_is_dir_even_when_unchecked() {
        let mut tree = project();
        tree.uncheck_all(tree.root(), true);
        let value: Value = serde_json::to_value(to_json(&tree)).unwrap();
        assert_eq!(value["type"], "dir");
        assert_eq!(value["state"], "unchecked");
        assert_eq!(value["children"], json!([]));
    }

    #[test]
    fn test_empty_container_is_dir() {
        let mut tree = SelectionTree::new("root");
        tree.add_child(tree.root(), "empty", true);
        match to_json(&tree) {
            JsonNode::Dir { children, .. } => {
                assert_eq!(children.len(), 1);
                assert!(matches!(&children[0], JsonNode::Dir { name, children, .. }
                    if name == "empty" && children.is_empty()));
            }
            other => panic!("expected dir, got {:?}", other),
        }
    }

    #[test]
    fn test_deep_chain_converts() {
        let mut tree = SelectionTree::new("root");
        let mut parent = tree.root();
        for i in 0..10_000 {
            parent = tree.add_child(parent, format!("d{}", i), true);
        }
        let mut node = to_json(&tree);
        let mut depth = 0;
        while let JsonNode::Dir { mut children, .. } = node {
            match children.pop() {
                Some(child) => node = child,
                None => break,
            }
            depth += 1;
        }
        assert_eq!(depth, 10_000);
    }
}
