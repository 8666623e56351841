//! Configuration types for tree building

use crate::gitignore::DEFAULT_IGNORE_FILE;

/// Configuration for `TreeBuilder`.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Uncheck entries matched by per-directory ignore files.
    pub apply_gitignore: bool,
    /// File name looked up in every directory for ignore patterns.
    pub ignore_file_name: String,
    /// Patterns applied from the root down, on top of any ignore files.
    pub extra_patterns: Vec<String>,
    /// Number of parallel workers when building several roots.
    /// 0 = auto-detect (use all available cores)
    /// 1 = sequential
    /// N = use N worker threads
    pub parallel_workers: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            apply_gitignore: true,
            ignore_file_name: DEFAULT_IGNORE_FILE.to_string(),
            extra_patterns: Vec::new(),
            parallel_workers: 0,
        }
    }
}
