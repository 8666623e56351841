//! Scoped ignore-file handling
//!
//! Each directory may carry its own ignore file. The patterns that apply to
//! a directory's children are the union of that directory's patterns with
//! every ancestor's; the builder composes them while walking down, so a
//! pattern found deep in the tree never leaks into sibling subtrees.
//!
//! - `pattern` - a single compiled pattern and the matching rules
//! - `set` - `PatternSet`, the patterns of one scope

mod pattern;
mod set;

pub use pattern::{Candidate, IgnorePattern, matches};
pub use set::PatternSet;

use crate::error::{Error, Result};
use crate::provider::FileProvider;

/// Name of the per-directory ignore file.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Loads per-directory pattern sets and tests entries against them.
#[derive(Debug, Clone)]
pub struct GitignoreMatcher {
    file_name: String,
    root_path: String,
}

impl GitignoreMatcher {
    /// Matcher for a walk rooted at `root_path` (a `FileProvider::path`).
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            file_name: DEFAULT_IGNORE_FILE.to_string(),
            root_path: root_path.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Read the ignore file of `dir`, if it has one.
    ///
    /// A missing file yields an empty set; a present file that cannot be
    /// read is an error.
    pub fn try_load_patterns<P: FileProvider>(
        &self,
        provider: &P,
        dir: &P::Handle,
    ) -> Result<PatternSet> {
        let file = provider
            .find_child(dir, &self.file_name)
            .map_err(|e| Error::io(provider.path(dir), e))?;

        match file {
            Some(file) if !provider.is_container(&file) => {
                let lines = provider
                    .read_lines(&file)
                    .map_err(|e| Error::io(provider.path(&file), e))?;
                Ok(PatternSet::from_lines(lines))
            }
            _ => Ok(PatternSet::new()),
        }
    }

    /// Like `try_load_patterns`, but an unreadable file is logged and
    /// treated as empty so the walk can carry on.
    pub fn load_patterns_from_directory<P: FileProvider>(
        &self,
        provider: &P,
        dir: &P::Handle,
    ) -> PatternSet {
        match self.try_load_patterns(provider, dir) {
            Ok(patterns) => patterns,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read ignore file, ignoring it");
                PatternSet::new()
            }
        }
    }

    /// Path of `path` relative to the walk root, always starting with `/`.
    ///
    /// Paths outside the root are returned unchanged.
    pub fn relative_path(&self, path: &str) -> String {
        let root = self.root_path.trim_end_matches('/');
        match path.strip_prefix(root) {
            Some("") => "/".to_string(),
            Some(rest) if rest.starts_with('/') => rest.to_string(),
            _ => path.to_string(),
        }
    }

    /// Whether `handle` is excluded by any pattern in `patterns`.
    pub fn is_ignored<P: FileProvider>(
        &self,
        provider: &P,
        patterns: &PatternSet,
        handle: &P::Handle,
    ) -> bool {
        if patterns.is_empty() {
            return false;
        }

        let name = provider.name(handle);
        let relative_path = self.relative_path(&provider.path(handle));
        let candidate = Candidate {
            name: &name,
            is_container: provider.is_container(handle),
            relative_path: &relative_path,
        };

        match patterns.first_match(&candidate) {
            Some(pattern) => {
                tracing::trace!(path = %relative_path, pattern, "ignored");
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MemoryProvider;

    #[test]
    fn test_relative_path() {
        let matcher = GitignoreMatcher::new("/work/proj");
        assert_eq!(matcher.relative_path("/work/proj"), "/");
        assert_eq!(matcher.relative_path("/work/proj/build/x.o"), "/build/x.o");
        assert_eq!(matcher.relative_path("/work/project/x"), "/work/project/x");

        let slash_root = GitignoreMatcher::new("/");
        assert_eq!(slash_root.relative_path("/etc/hosts"), "/etc/hosts");
    }

    #[test]
    fn test_load_patterns() {
        let provider = MemoryProvider::new("proj")
            .file(".gitignore", "# comment\n\n*.log\n  target/  \n")
            .file("main.rs", "");
        let matcher = GitignoreMatcher::new(provider.path(&provider.root()));

        let patterns = matcher.load_patterns_from_directory(&provider, &provider.root());
        let raw: Vec<_> = patterns.iter().collect();
        assert_eq!(raw, vec!["*.log", "target/"]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let provider = MemoryProvider::new("proj").file("main.rs", "");
        let matcher = GitignoreMatcher::new("/proj");
        assert!(matcher.try_load_patterns(&provider, &provider.root()).unwrap().is_empty());
    }

    #[test]
    fn test_directory_named_like_ignore_file_is_skipped() {
        let provider = MemoryProvider::new("proj").dir(".gitignore");
        let matcher = GitignoreMatcher::new("/proj");
        assert!(matcher.try_load_patterns(&provider, &provider.root()).unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_file_is_logged_and_empty() {
        let provider = MemoryProvider::new("proj")
            .file(".gitignore", "*.log\n")
            .fail_read(".gitignore");
        let matcher = GitignoreMatcher::new("/proj");

        assert!(matches!(
            matcher.try_load_patterns(&provider, &provider.root()),
            Err(Error::Io { .. })
        ));
        assert!(matcher.load_patterns_from_directory(&provider, &provider.root()).is_empty());
    }

    #[test]
    fn test_custom_file_name() {
        let provider = MemoryProvider::new("proj")
            .file(".gitignore", "*.log\n")
            .file(".treeignore", "*.md\n");
        let matcher = GitignoreMatcher::new("/proj").with_file_name(".treeignore");

        let patterns = matcher.load_patterns_from_directory(&provider, &provider.root());
        assert!(patterns.contains("*.md"));
        assert!(!patterns.contains("*.log"));
    }

    #[test]
    fn test_is_ignored_uses_provider_facts() {
        let provider = MemoryProvider::new("proj").dir("build").file("build.rs", "");
        let matcher = GitignoreMatcher::new("/proj");
        let patterns = PatternSet::from_lines(["build/"]);

        let children = provider.children(&provider.root()).unwrap();
        let ignored: Vec<_> = children
            .iter()
            .filter(|c| matcher.is_ignored(&provider, &patterns, c))
            .map(|c| provider.name(c))
            .collect();
        assert_eq!(ignored, vec!["build"]);
    }
}
