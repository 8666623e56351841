//! Test utilities: temporary directories and an in-memory file provider.
//!
//! This module is only compiled for tests, benchmarks and the `test-utils`
//! feature.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::provider::FileProvider;

/// A temporary directory for filesystem-backed tests.
///
/// The directory is removed when dropped.
pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file, creating parent directories as needed.
    pub fn add_file(&self, path: &str, content: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Create a directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
struct MemoryEntry {
    name: String,
    is_dir: bool,
    content: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// In-memory `FileProvider` with insertion-ordered children.
///
/// Handles are entry indices; the root is `0` and lives at `/<root name>`.
/// Listing or reading specific entries can be made to fail.
#[derive(Debug, Clone)]
pub struct MemoryProvider {
    entries: Vec<MemoryEntry>,
    failing_lists: HashSet<usize>,
    failing_reads: HashSet<usize>,
}

impl MemoryProvider {
    pub fn new(root_name: &str) -> Self {
        Self {
            entries: vec![MemoryEntry {
                name: root_name.to_string(),
                is_dir: true,
                content: String::new(),
                parent: None,
                children: Vec::new(),
            }],
            failing_lists: HashSet::new(),
            failing_reads: HashSet::new(),
        }
    }

    pub fn root(&self) -> usize {
        0
    }

    /// Add a file at a slash-separated path, creating directories on the way.
    pub fn file(mut self, path: &str, content: &str) -> Self {
        let (parent, name) = self.ensure_parent(path);
        let id = self.push(parent, name, false);
        self.entries[id].content = content.to_string();
        self
    }

    /// Add a directory at a slash-separated path.
    pub fn dir(mut self, path: &str) -> Self {
        let (parent, name) = self.ensure_parent(path);
        if self.child_named(parent, name).is_none() {
            self.push(parent, name, true);
        }
        self
    }

    /// Make listing the children of `path` fail.
    pub fn fail_list(mut self, path: &str) -> Self {
        let id = self.lookup(path).expect("no such entry");
        self.failing_lists.insert(id);
        self
    }

    /// Make reading `path` fail.
    pub fn fail_read(mut self, path: &str) -> Self {
        let id = self.lookup(path).expect("no such entry");
        self.failing_reads.insert(id);
        self
    }

    /// Append an entry under `parent` and return its handle.
    pub fn push(&mut self, parent: usize, name: &str, is_dir: bool) -> usize {
        let id = self.entries.len();
        self.entries.push(MemoryEntry {
            name: name.to_string(),
            is_dir,
            content: String::new(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.entries[parent].children.push(id);
        id
    }

    /// Handle of the entry at a slash-separated path below the root.
    pub fn lookup(&self, path: &str) -> Option<usize> {
        let mut current = 0;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = self.child_named(current, segment)?;
        }
        Some(current)
    }

    fn child_named(&self, parent: usize, name: &str) -> Option<usize> {
        self.entries[parent]
            .children
            .iter()
            .copied()
            .find(|&c| self.entries[c].name == name)
    }

    fn ensure_parent<'a>(&mut self, path: &'a str) -> (usize, &'a str) {
        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let name = segments.pop().expect("empty path");
        let mut current = 0;
        for segment in segments {
            current = match self.child_named(current, segment) {
                Some(id) => id,
                None => self.push(current, segment, true),
            };
        }
        (current, name)
    }
}

impl FileProvider for MemoryProvider {
    type Handle = usize;

    fn name(&self, handle: &usize) -> String {
        self.entries[*handle].name.clone()
    }

    fn is_container(&self, handle: &usize) -> bool {
        self.entries[*handle].is_dir
    }

    fn children(&self, handle: &usize) -> io::Result<Vec<usize>> {
        if self.failing_lists.contains(handle) {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
        }
        Ok(self.entries[*handle].children.clone())
    }

    fn path(&self, handle: &usize) -> String {
        let mut names = Vec::new();
        let mut current = Some(*handle);
        while let Some(id) = current {
            names.push(self.entries[id].name.as_str());
            current = self.entries[id].parent;
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    fn read_lines(&self, handle: &usize) -> io::Result<Vec<String>> {
        if self.failing_reads.contains(handle) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "stream did not contain valid UTF-8",
            ));
        }
        Ok(self.entries[*handle]
            .content
            .lines()
            .map(str::to_string)
            .collect())
    }
}
