//! Bulk selection operations
//!
//! These force the target node's own state instead of computing it from its
//! children, rewrite the chosen scope below it, and then re-aggregate the
//! ancestor chain once.

use super::state::CheckState;
use super::tree::{NodeId, SelectionTree};

/// Which nodes below the target a bulk operation rewrites.
fn scope(tree: &SelectionTree, id: NodeId, recursive: bool) -> Vec<NodeId> {
    if recursive {
        tree.descendants(id).collect()
    } else {
        tree.children(id).to_vec()
    }
}

impl SelectionTree {
    /// Check every container and uncheck every leaf below `id`.
    pub fn check_only_folders(&mut self, id: NodeId, recursive: bool) {
        self.check_by_kind(id, recursive, true);
    }

    /// Check every leaf and uncheck every container below `id`.
    pub fn check_only_files(&mut self, id: NodeId, recursive: bool) {
        self.check_by_kind(id, recursive, false);
    }

    fn check_by_kind(&mut self, id: NodeId, recursive: bool, containers: bool) {
        self.force(id, CheckState::Checked);
        for node in scope(self, id, recursive) {
            let state = if self.is_container(node) == containers {
                CheckState::Checked
            } else {
                CheckState::Unchecked
            };
            self.force(node, state);
        }
        self.refresh_ancestors(id);
    }

    /// Check `id` and its children (all descendants when `recursive`).
    pub fn check_all(&mut self, id: NodeId, recursive: bool) {
        self.force(id, CheckState::Checked);
        for node in scope(self, id, recursive) {
            self.force(node, CheckState::Checked);
        }
        self.refresh_ancestors(id);
    }

    /// Uncheck every descendant of `id`, and `id` itself when `with_self`.
    pub fn uncheck_all(&mut self, id: NodeId, with_self: bool) {
        if with_self {
            self.force(id, CheckState::Unchecked);
        }
        self.overwrite_descendants(id, CheckState::Unchecked);
        self.refresh_ancestors(id);
    }

    /// Check `id` alone, leaving its subtree as it is.
    pub fn check_without_children(&mut self, id: NodeId) {
        self.force(id, CheckState::Checked);
        self.refresh_ancestors(id);
    }

    /// Checkbox click: checked becomes unchecked, anything else becomes checked.
    pub fn toggle(&mut self, id: NodeId) {
        let checked = self.state(id) != CheckState::Checked;
        self.set_checked(id, checked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CheckState::*;

    /// root
    /// ├── src/
    /// │   ├── lib.rs
    /// │   └── util/
    /// │       └── mod.rs
    /// ├── empty/
    /// └── README.md
    struct Fixture {
        tree: SelectionTree,
        src: NodeId,
        lib: NodeId,
        util: NodeId,
        module: NodeId,
        empty: NodeId,
        readme: NodeId,
    }

    fn fixture() -> Fixture {
        let mut tree = SelectionTree::new("root");
        let root = tree.root();
        let src = tree.add_child(root, "src", true);
        let lib = tree.add_child(src, "lib.rs", false);
        let util = tree.add_child(src, "util", true);
        let module = tree.add_child(util, "mod.rs", false);
        let empty = tree.add_child(root, "empty", true);
        let readme = tree.add_child(root, "README.md", false);
        Fixture {
            tree,
            src,
            lib,
            util,
            module,
            empty,
            readme,
        }
    }

    #[test]
    fn test_uncheck_all_then_check_all_restores_everything() {
        let mut f = fixture();
        let root = f.tree.root();
        f.tree.uncheck_all(root, true);
        assert!(f.tree.descendants(root).all(|id| f.tree.state(id) == Unchecked));
        assert_eq!(f.tree.state(root), Unchecked);

        f.tree.check_all(root, true);
        assert_eq!(f.tree.state(root), Checked);
        assert!(f.tree.descendants(root).all(|id| f.tree.state(id) == Checked));
    }

    #[test]
    fn test_uncheck_all_defaults_to_descendants_only() {
        let mut f = fixture();
        f.tree.uncheck_all(f.src, false);
        assert_eq!(f.tree.state(f.src), Checked);
        assert_eq!(f.tree.state(f.lib), Unchecked);
        assert_eq!(f.tree.state(f.module), Unchecked);
        assert_eq!(f.tree.state(f.tree.root()), Checked);
    }

    #[test]
    fn test_uncheck_all_with_self_updates_parent() {
        let mut f = fixture();
        f.tree.uncheck_all(f.src, true);
        assert_eq!(f.tree.state(f.src), Unchecked);
        assert_eq!(f.tree.state(f.tree.root()), Indeterminate);
    }

    #[test]
    fn test_check_only_folders_recursive() {
        let mut f = fixture();
        let root = f.tree.root();
        f.tree.check_only_folders(root, true);

        assert_eq!(f.tree.state(root), Checked);
        for id in f.tree.descendants(root).collect::<Vec<_>>() {
            let expected = if f.tree.is_container(id) { Checked } else { Unchecked };
            assert_eq!(f.tree.state(id), expected, "{}", f.tree.label(id));
        }
        assert_eq!(f.tree.state(f.empty), Checked);
    }

    #[test]
    fn test_check_only_folders_this_level() {
        let mut f = fixture();
        let root = f.tree.root();
        f.tree.uncheck_all(root, true);
        f.tree.check_only_folders(root, false);

        assert_eq!(f.tree.state(root), Checked);
        assert_eq!(f.tree.state(f.src), Checked);
        assert_eq!(f.tree.state(f.empty), Checked);
        assert_eq!(f.tree.state(f.readme), Unchecked);
        // Grandchildren are outside the scope.
        assert_eq!(f.tree.state(f.lib), Unchecked);
        assert_eq!(f.tree.state(f.util), Unchecked);
    }

    #[test]
    fn test_check_only_files_recursive() {
        let mut f = fixture();
        let root = f.tree.root();
        f.tree.check_only_files(root, true);

        assert_eq!(f.tree.state(root), Checked);
        assert_eq!(f.tree.state(f.src), Unchecked);
        assert_eq!(f.tree.state(f.util), Unchecked);
        assert_eq!(f.tree.state(f.empty), Unchecked);
        assert_eq!(f.tree.state(f.lib), Checked);
        assert_eq!(f.tree.state(f.module), Checked);
        assert_eq!(f.tree.state(f.readme), Checked);
    }

    #[test]
    fn test_check_only_files_this_level() {
        let mut f = fixture();
        f.tree.check_only_files(f.src, false);
        assert_eq!(f.tree.state(f.src), Checked);
        assert_eq!(f.tree.state(f.lib), Checked);
        assert_eq!(f.tree.state(f.util), Unchecked);
        assert_eq!(f.tree.state(f.module), Checked);
    }

    #[test]
    fn test_bulk_operation_updates_parent_chain_once() {
        let mut f = fixture();
        let root = f.tree.root();
        f.tree.uncheck_all(root, true);
        f.tree.check_all(f.util, true);

        assert_eq!(f.tree.state(f.module), Checked);
        assert_eq!(f.tree.state(f.src), Indeterminate);
        assert_eq!(f.tree.state(root), Indeterminate);
    }

    #[test]
    fn test_check_all_this_level_leaves_grandchildren() {
        let mut f = fixture();
        let root = f.tree.root();
        f.tree.uncheck_all(root, true);
        f.tree.check_all(root, false);

        assert_eq!(f.tree.state(f.src), Checked);
        assert_eq!(f.tree.state(f.readme), Checked);
        assert_eq!(f.tree.state(f.lib), Unchecked);
    }

    #[test]
    fn test_check_without_children() {
        let mut f = fixture();
        let root = f.tree.root();
        f.tree.uncheck_all(root, true);
        f.tree.check_without_children(f.src);

        assert_eq!(f.tree.state(f.src), Checked);
        assert_eq!(f.tree.state(f.lib), Unchecked);
        assert_eq!(f.tree.state(root), Indeterminate);
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut f = fixture();
        f.tree.toggle(f.src);
        assert_eq!(f.tree.state(f.src), Unchecked);
        assert_eq!(f.tree.state(f.module), Unchecked);

        f.tree.toggle(f.src);
        assert_eq!(f.tree.state(f.src), Checked);
        assert_eq!(f.tree.state(f.module), Checked);
        assert_eq!(f.tree.state(f.tree.root()), Checked);
    }

    #[test]
    fn test_toggle_indeterminate_checks() {
        let mut f = fixture();
        f.tree.toggle(f.lib);
        assert_eq!(f.tree.state(f.src), Indeterminate);
        f.tree.toggle(f.src);
        assert_eq!(f.tree.state(f.src), Checked);
        assert_eq!(f.tree.state(f.lib), Checked);
    }

    #[test]
    fn test_leaf_mutations_keep_aggregation_invariant() {
        let mut f = fixture();
        let root = f.tree.root();
        for leaf in [f.lib, f.readme, f.module, f.lib] {
            f.tree.toggle(leaf);
            for id in std::iter::once(root).chain(f.tree.descendants(root)).collect::<Vec<_>>() {
                if let Some(expected) =
                    CheckState::aggregate(f.tree.children(id).iter().map(|&c| f.tree.state(c)))
                {
                    assert_eq!(f.tree.state(id), expected, "{}", f.tree.label(id));
                }
            }
        }
    }
}
