//! Shared helpers for the output formatters

use crate::selection::{NodeId, SelectionTree};

/// Connector for a line, depending on whether it is the last visible sibling.
pub fn connector(is_last: bool) -> &'static str {
    if is_last { "└── " } else { "├── " }
}

/// Indentation a line hands down to its children.
pub fn indent(is_last: bool) -> &'static str {
    if is_last { "    " } else { "│   " }
}

/// Children of `id` that are checked or partially checked, in order.
pub fn visible_children(tree: &SelectionTree, id: NodeId) -> Vec<NodeId> {
    tree.children(id)
        .iter()
        .copied()
        .filter(|&child| tree.state(child).is_visible())
        .collect()
}

/// Label as drawn: nodes with children get a trailing `/`, unless the label
/// already ends in one (the filesystem root).
pub fn display_name(tree: &SelectionTree, id: NodeId) -> String {
    let node = tree.node(id);
    if (node.has_children() || id == tree.root()) && !node.label().ends_with('/') {
        format!("{}/", node.label())
    } else {
        node.label().to_string()
    }
}
