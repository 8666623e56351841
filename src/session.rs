//! Opened trees and their background builds
//!
//! A `Session` is owned by the caller and holds one tab per opened root.
//! Each tab starts out `Loading` while a background thread builds its tree,
//! and becomes `Ready` or `Failed` once the result is collected with
//! [`Session::poll`] or [`Session::wait`].

use std::fmt;
use std::thread::{self, JoinHandle};

use crate::error::Result;
use crate::provider::FileProvider;
use crate::selection::SelectionTree;
use crate::tree::TreeBuilder;

/// Identifier of a tab, unique within its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(u64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
pub enum TabContent {
    Loading,
    Ready(SelectionTree),
    /// Error message of a build that could not list its root.
    Failed(String),
}

#[derive(Debug)]
pub struct Tab {
    id: TabId,
    root_name: String,
    content: TabContent,
    pending: Option<JoinHandle<Result<SelectionTree>>>,
}

impl Tab {
    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn content(&self) -> &TabContent {
        &self.content
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.content, TabContent::Loading)
    }

    /// Display title: `"<root> (loading)"` while building, `"<root> (<id>)"`
    /// afterwards.
    pub fn title(&self) -> String {
        match self.content {
            TabContent::Loading => format!("{} (loading)", self.root_name),
            _ => format!("{} ({})", self.root_name, self.id),
        }
    }

    pub fn tree(&self) -> Option<&SelectionTree> {
        match &self.content {
            TabContent::Ready(tree) => Some(tree),
            _ => None,
        }
    }

    /// Install the finished build, if any. Returns `true` when the tab
    /// stopped loading.
    fn collect(&mut self, block: bool) -> bool {
        let finished = match &self.pending {
            Some(handle) => block || handle.is_finished(),
            None => return false,
        };
        if !finished {
            return false;
        }
        let Some(handle) = self.pending.take() else {
            return false;
        };

        self.content = match handle.join() {
            Ok(Ok(tree)) => {
                tracing::info!(
                    tab = %self.id,
                    root = %self.root_name,
                    nodes = tree.node_count(),
                    "tree ready"
                );
                TabContent::Ready(tree)
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    tab = %self.id,
                    root = %self.root_name,
                    error = %e,
                    "tree build failed"
                );
                TabContent::Failed(e.to_string())
            }
            Err(_) => {
                tracing::error!(tab = %self.id, root = %self.root_name, "tree build panicked");
                TabContent::Failed(format!("build of '{}' panicked", self.root_name))
            }
        };
        true
    }
}

/// Caller-owned collection of opened trees.
#[derive(Debug, Default)]
pub struct Session {
    tabs: Vec<Tab>,
    next_id: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building `root` on a background thread and open a tab for it.
    ///
    /// The tab is `Loading` until the build is collected. If no thread can
    /// be spawned the tab is `Failed` right away.
    pub fn open<P>(&mut self, builder: TreeBuilder<P>, root: P::Handle) -> TabId
    where
        P: FileProvider + Send + 'static,
        P::Handle: Send + 'static,
    {
        self.next_id += 1;
        let id = TabId(self.next_id);
        let root_name = builder.provider().name(&root);
        tracing::debug!(tab = %id, root = %root_name, "opening tab");

        let spawned = thread::Builder::new()
            .name(format!("treemark-build-{}", id))
            .spawn(move || builder.build(&root));

        let (content, pending) = match spawned {
            Ok(handle) => (TabContent::Loading, Some(handle)),
            Err(e) => {
                tracing::warn!(tab = %id, error = %e, "cannot spawn build thread");
                (TabContent::Failed(e.to_string()), None)
            }
        };

        self.tabs.push(Tab {
            id,
            root_name,
            content,
            pending,
        });
        id
    }

    /// Collect every build that has finished, without blocking. Returns the
    /// tabs that stopped loading.
    pub fn poll(&mut self) -> Vec<TabId> {
        self.tabs
            .iter_mut()
            .filter_map(|tab| tab.collect(false).then_some(tab.id))
            .collect()
    }

    /// Block until every pending build has finished.
    pub fn wait(&mut self) {
        for tab in &mut self.tabs {
            tab.collect(true);
        }
    }

    /// Block until the build behind `id` has finished.
    pub fn wait_for(&mut self, id: TabId) -> Option<&Tab> {
        let tab = self.tabs.iter_mut().find(|tab| tab.id == id)?;
        tab.collect(true);
        Some(&*tab)
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id == id)
    }

    /// Mutable access to a ready tree.
    pub fn tree_mut(&mut self, id: TabId) -> Option<&mut SelectionTree> {
        self.tabs
            .iter_mut()
            .find(|tab| tab.id == id)
            .and_then(|tab| match &mut tab.content {
                TabContent::Ready(tree) => Some(tree),
                _ => None,
            })
    }

    /// Remove a tab. A build still running is detached and its result
    /// discarded.
    pub fn close(&mut self, id: TabId) -> bool {
        let before = self.tabs.len();
        self.tabs.retain(|tab| tab.id != id);
        self.tabs.len() != before
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}
