//! Tri-state selection model
//!
//! - `state` - the `CheckState` enum and the aggregation rule
//! - `tree` - the arena-backed `SelectionTree` and its state-setting contract
//! - `bulk` - check-all / uncheck-all / only-folders / only-files operations

mod bulk;
mod state;
mod tree;

pub use state::CheckState;
pub use tree::{Descendants, NodeId, SelectionCounts, SelectionNode, SelectionTree};
