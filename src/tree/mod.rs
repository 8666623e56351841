//! Selection tree construction
//!
//! `TreeBuilder` walks a `FileProvider` and produces a `SelectionTree` whose
//! initial selection reflects the ignore files found along the way.

mod builder;
mod config;

pub use builder::TreeBuilder;
pub use config::BuildConfig;
