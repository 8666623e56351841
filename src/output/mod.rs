//! Tree formatting and display
//!
//! This module provides formatters for outputting selection trees:
//! - Plain text diagram (`render`), the form meant for pasting elsewhere
//! - Console output with colors
//! - JSON output
//!
//! # Module Structure
//!
//! - `config` - Output configuration types
//! - `utils` - Connector glyphs, indentation, visible-children lookup
//! - `tree` - Text renderer and colored formatter
//! - `json` - JSON output

mod config;
mod json;
mod tree;
mod utils;

pub use config::OutputConfig;
pub use json::{JsonNode, print_json, to_json};
pub use tree::{TreeFormatter, render};
pub use utils::visible_children;
