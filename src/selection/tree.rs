//! Arena-backed selection tree
//!
//! Nodes live in a single `Vec` and refer to each other by `NodeId`. A node
//! owns the ordered list of its children's ids and keeps a non-owning id of
//! its parent, so there are no reference cycles between parent and child.
//!
//! Every state change goes through `set_state` (or one of the bulk
//! operations in `bulk.rs`), which keeps the aggregation invariant: a node
//! with children is `Checked` iff all children are checked, `Unchecked` iff
//! all are unchecked, and `Indeterminate` otherwise. Propagation in both
//! directions uses explicit loops so arbitrarily deep trees are safe.

use crate::error::{Error, Result};

use super::state::CheckState;

/// Stable handle to a node inside a `SelectionTree`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single entry in the selection tree.
#[derive(Debug, Clone)]
pub struct SelectionNode {
    label: String,
    is_container: bool,
    state: CheckState,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

impl SelectionNode {
    fn new(label: String, is_container: bool, parent: Option<NodeId>) -> Self {
        Self {
            label,
            is_container,
            state: CheckState::Checked,
            children: Vec::new(),
            parent,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the node stands for a directory, independent of its child count.
    pub fn is_container(&self) -> bool {
        self.is_container
    }

    pub fn state(&self) -> CheckState {
        self.state
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Totals of nodes per check state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionCounts {
    pub checked: usize,
    pub indeterminate: usize,
    pub unchecked: usize,
}

/// A tri-state selection tree.
///
/// Node ids handed out by one tree are only meaningful for that tree; passing
/// an id from another tree panics on out-of-range access like slice indexing.
#[derive(Debug, Clone)]
pub struct SelectionTree {
    nodes: Vec<SelectionNode>,
}

impl SelectionTree {
    /// Create a tree holding only a checked container root.
    pub fn new(root_label: impl Into<String>) -> Self {
        Self {
            nodes: vec![SelectionNode::new(root_label.into(), true, None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &SelectionNode {
        &self.nodes[id.0]
    }

    pub fn label(&self, id: NodeId) -> &str {
        self.node(id).label()
    }

    pub fn state(&self, id: NodeId) -> CheckState {
        self.node(id).state
    }

    pub fn is_container(&self, id: NodeId) -> bool {
        self.node(id).is_container
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Append a checked child under `parent`, keeping insertion order.
    ///
    /// The parent's own state is left alone; callers building a tree from
    /// scratch attach everything before touching any state.
    pub fn add_child(
        &mut self,
        parent: NodeId,
        label: impl Into<String>,
        is_container: bool,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes
            .push(SelectionNode::new(label.into(), is_container, Some(parent)));
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Pre-order iterator over every node below `id` (excluding `id`).
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { tree: self, stack }
    }

    /// Resolve a slash-separated path of labels relative to the root.
    ///
    /// Empty segments and `.` are skipped, so `"src/main.rs"`,
    /// `"./src/main.rs"` and `"/src/main.rs"` are equivalent. An empty path
    /// resolves to the root.
    pub fn find_path(&self, path: &str) -> Option<NodeId> {
        let mut current = self.root();
        for segment in path.split('/').filter(|s| !s.is_empty() && *s != ".") {
            current = *self
                .children(current)
                .iter()
                .find(|&&child| self.label(child) == segment)?;
        }
        Some(current)
    }

    /// Like `find_path`, but reports a miss as `Error::UnknownPath`.
    pub fn resolve(&self, path: &str) -> Result<NodeId> {
        self.find_path(path)
            .ok_or_else(|| Error::UnknownPath(path.to_string()))
    }

    pub fn counts(&self) -> SelectionCounts {
        let mut counts = SelectionCounts::default();
        for node in &self.nodes {
            match node.state {
                CheckState::Checked => counts.checked += 1,
                CheckState::Indeterminate => counts.indeterminate += 1,
                CheckState::Unchecked => counts.unchecked += 1,
            }
        }
        counts
    }

    /// Set a node to `Checked` or `Unchecked`.
    ///
    /// With `propagate_to_children` every descendant is overwritten with the
    /// same state. With `update_parent` the ancestors re-aggregate from their
    /// immediate children, stopping at the first one whose state does not
    /// change. `Indeterminate` cannot be requested.
    pub fn set_state(
        &mut self,
        id: NodeId,
        state: CheckState,
        propagate_to_children: bool,
        update_parent: bool,
    ) -> Result<()> {
        if state == CheckState::Indeterminate {
            return Err(Error::InvalidState(u8::from(state)));
        }

        self.nodes[id.0].state = state;
        if propagate_to_children {
            self.overwrite_descendants(id, state);
        }
        if update_parent {
            self.refresh_ancestors(id);
        }
        Ok(())
    }

    /// Same as `set_state` with a raw value (0 = unchecked, 1 = checked).
    pub fn set_state_raw(
        &mut self,
        id: NodeId,
        raw: u8,
        propagate_to_children: bool,
        update_parent: bool,
    ) -> Result<()> {
        let state = CheckState::try_from(raw)?;
        self.set_state(id, state, propagate_to_children, update_parent)
    }

    /// Check or uncheck a node with full propagation in both directions.
    pub fn set_checked(&mut self, id: NodeId, checked: bool) {
        let state = if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        };
        self.force(id, state);
        self.overwrite_descendants(id, state);
        self.refresh_ancestors(id);
    }

    /// Write a state without any propagation.
    pub(crate) fn force(&mut self, id: NodeId, state: CheckState) {
        self.nodes[id.0].state = state;
    }

    /// Force every descendant of `id` to `state`.
    pub(crate) fn overwrite_descendants(&mut self, id: NodeId, state: CheckState) {
        let mut stack = self.nodes[id.0].children.clone();
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current.0];
            node.state = state;
            stack.extend_from_slice(&node.children);
        }
    }

    /// Re-aggregate the ancestors of `id`, bottom-up, until one is unchanged.
    pub(crate) fn refresh_ancestors(&mut self, id: NodeId) {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            let Some(aggregated) = self.aggregate_children(parent) else {
                break;
            };
            if self.nodes[parent.0].state == aggregated {
                break;
            }
            self.nodes[parent.0].state = aggregated;
            current = self.parent(parent);
        }
    }

    fn aggregate_children(&self, id: NodeId) -> Option<CheckState> {
        CheckState::aggregate(self.children(id).iter().map(|&child| self.state(child)))
    }
}

/// Pre-order iterator returned by `SelectionTree::descendants`.
pub struct Descendants<'a> {
    tree: &'a SelectionTree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}
