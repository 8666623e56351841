//! Output configuration types

/// Configuration for output formatting.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
    /// Append a "N directories, M files" line when printing.
    pub summary: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_color: true,
            summary: false,
        }
    }
}
