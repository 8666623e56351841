//! TreeBuilder - turns a provider's hierarchy into a selection tree

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::gitignore::{GitignoreMatcher, PatternSet};
use crate::provider::FileProvider;
use crate::selection::{CheckState, NodeId, SelectionTree};

use super::config::BuildConfig;

/// Builds a `SelectionTree` from a `FileProvider` in two passes:
///
/// 1. walk the hierarchy with an explicit stack and attach every entry as a
///    checked node;
/// 2. walk again from the root, composing each directory's effective ignore
///    patterns from its ancestors', and uncheck every matching child.
///
/// Neither pass recurses on the call stack, so directory depth is not
/// limited by thread stack size.
pub struct TreeBuilder<P: FileProvider> {
    provider: P,
    config: BuildConfig,
}

impl<P: FileProvider> TreeBuilder<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            config: BuildConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BuildConfig) -> Self {
        self.config = config;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Build the selection tree rooted at `root`.
    ///
    /// Fails only when the root itself cannot be listed. Directories below it
    /// that cannot be listed end up as empty containers.
    pub fn build(&self, root: &P::Handle) -> Result<SelectionTree> {
        let (mut tree, handles) = self.build_structure(root)?;
        self.apply_ignore_rules(&mut tree, &handles);
        Ok(tree)
    }

    /// Pass 1: attach every entry. Returns the tree plus the provider handle
    /// of each node, indexed by `NodeId::index`.
    fn build_structure(&self, root: &P::Handle) -> Result<(SelectionTree, Vec<P::Handle>)> {
        let provider = &self.provider;
        let mut tree = SelectionTree::new(provider.name(root));
        let mut handles = vec![root.clone()];

        let mut stack: Vec<(NodeId, P::Handle)> = vec![(tree.root(), root.clone())];
        while let Some((node, handle)) = stack.pop() {
            let children = match provider.children(&handle) {
                Ok(children) => children,
                Err(e) if node == tree.root() => {
                    return Err(Error::io(provider.path(&handle), e));
                }
                Err(e) => {
                    tracing::warn!(
                        path = %provider.path(&handle),
                        error = %e,
                        "cannot list directory, leaving it empty"
                    );
                    continue;
                }
            };

            for child in children {
                let is_container = provider.is_container(&child);
                let id = tree.add_child(node, provider.name(&child), is_container);
                debug_assert_eq!(id.index(), handles.len());
                handles.push(child.clone());
                if is_container {
                    stack.push((id, child));
                }
            }
        }

        tracing::debug!(nodes = tree.node_count(), "tree structure built");
        Ok((tree, handles))
    }

    /// Pass 2: uncheck ignored entries, then re-aggregate their ancestors.
    fn apply_ignore_rules(&self, tree: &mut SelectionTree, handles: &[P::Handle]) {
        let provider = &self.provider;
        let root = &handles[tree.root().index()];
        let matcher = GitignoreMatcher::new(provider.path(root))
            .with_file_name(self.config.ignore_file_name.as_str());

        let mut root_patterns = if self.config.apply_gitignore {
            matcher.load_patterns_from_directory(provider, root)
        } else {
            PatternSet::new()
        };
        for pattern in &self.config.extra_patterns {
            root_patterns.insert(pattern);
        }
        if !self.config.apply_gitignore && root_patterns.is_empty() {
            return;
        }

        let mut ignored = Vec::new();
        let mut stack: Vec<(NodeId, PatternSet)> = vec![(tree.root(), root_patterns)];
        while let Some((node, patterns)) = stack.pop() {
            tracing::debug!(
                dir = %tree.label(node),
                patterns = ?patterns.iter().collect::<Vec<_>>(),
                "applying ignore patterns"
            );

            for child in tree.children(node).to_vec() {
                let handle = &handles[child.index()];
                if matcher.is_ignored(provider, &patterns, handle) {
                    tree.force(child, CheckState::Unchecked);
                    if tree.is_container(child) {
                        tree.overwrite_descendants(child, CheckState::Unchecked);
                    }
                    ignored.push(child);
                } else if tree.is_container(child) && tree.node(child).has_children() {
                    let child_patterns = if self.config.apply_gitignore {
                        patterns.union(&matcher.load_patterns_from_directory(provider, handle))
                    } else {
                        patterns.clone()
                    };
                    stack.push((child, child_patterns));
                }
            }
        }

        tracing::debug!(ignored = ignored.len(), "ignore rules applied");
        for id in ignored {
            tree.refresh_ancestors(id);
        }
    }
}

impl<P> TreeBuilder<P>
where
    P: FileProvider + Sync,
    P::Handle: Send + Sync,
{
    /// Build several independent roots, in parallel unless
    /// `parallel_workers == 1`. Results keep the order of `roots`.
    pub fn build_many(&self, roots: &[P::Handle]) -> Vec<Result<SelectionTree>> {
        match self.config.parallel_workers {
            1 => roots.iter().map(|root| self.build(root)).collect(),
            0 => roots.par_iter().map(|root| self.build(root)).collect(),
            workers => match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
                Ok(pool) => {
                    pool.install(|| roots.par_iter().map(|root| self.build(root)).collect())
                }
                Err(e) => {
                    tracing::warn!(error = %e, "cannot create thread pool, using the global one");
                    roots.par_iter().map(|root| self.build(root)).collect()
                }
            },
        }
    }
}
