//! Treemark - select parts of a directory tree and export them as text
//!
//! A directory is loaded into a [`SelectionTree`] of tri-state checkboxes,
//! with entries matched by `.gitignore` files deselected from the start.
//! The selection can then be edited and rendered as a Unicode tree diagram
//! or exported as JSON.
//!
//! ```no_run
//! use treemark::{FsProvider, TreeBuilder, render};
//!
//! let builder = TreeBuilder::new(FsProvider::new());
//! let mut tree = builder.build(&std::path::PathBuf::from("."))?;
//! let root = tree.root();
//! tree.check_only_folders(root, true);
//! print!("{}", render(&tree));
//! # Ok::<(), treemark::Error>(())
//! ```

pub mod error;
pub mod gitignore;
pub mod logging;
pub mod output;
pub mod provider;
pub mod selection;
pub mod session;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, Result};
pub use gitignore::{GitignoreMatcher, PatternSet};
pub use output::{JsonNode, OutputConfig, TreeFormatter, print_json, render, to_json};
pub use provider::{FileProvider, FsProvider};
pub use selection::{CheckState, NodeId, SelectionCounts, SelectionTree};
pub use session::{Session, Tab, TabContent, TabId};
pub use tree::{BuildConfig, TreeBuilder};
