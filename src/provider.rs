//! File-tree providers
//!
//! The builder never touches the filesystem directly. It talks to a
//! `FileProvider`, which hands out opaque handles and answers questions
//! about them. `FsProvider` is the implementation over `std::fs`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Source of a directory hierarchy.
pub trait FileProvider {
    type Handle: Clone;

    /// Base name of the entry.
    fn name(&self, handle: &Self::Handle) -> String;

    /// Whether the entry can have children.
    fn is_container(&self, handle: &Self::Handle) -> bool;

    /// Ordered children of a container.
    fn children(&self, handle: &Self::Handle) -> io::Result<Vec<Self::Handle>>;

    /// `/`-separated path, used for root-anchored ignore patterns.
    fn path(&self, handle: &Self::Handle) -> String;

    /// Lines of a text entry. Bytes that are not valid UTF-8 are replaced,
    /// never rejected.
    fn read_lines(&self, handle: &Self::Handle) -> io::Result<Vec<String>>;

    /// Find a direct child by name.
    fn find_child(&self, dir: &Self::Handle, name: &str) -> io::Result<Option<Self::Handle>> {
        Ok(self
            .children(dir)?
            .into_iter()
            .find(|child| self.name(child) == name))
    }
}

/// `FileProvider` over the local filesystem.
///
/// Entries are listed sorted by file name. Symlinks are reported as leaves
/// and never followed, which keeps link cycles out of the walk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProvider;

impl FsProvider {
    pub fn new() -> Self {
        Self
    }
}

impl FileProvider for FsProvider {
    type Handle = PathBuf;

    fn name(&self, handle: &PathBuf) -> String {
        handle
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| handle.to_string_lossy().to_string())
    }

    fn is_container(&self, handle: &PathBuf) -> bool {
        fs::symlink_metadata(handle)
            .map(|meta| meta.is_dir())
            .unwrap_or(false)
    }

    fn children(&self, handle: &PathBuf) -> io::Result<Vec<PathBuf>> {
        let mut entries: Vec<_> = fs::read_dir(handle)?.filter_map(|e| e.ok()).collect();
        entries.sort_by_key(|e| e.file_name());
        Ok(entries.into_iter().map(|e| e.path()).collect())
    }

    fn path(&self, handle: &PathBuf) -> String {
        slash_path(handle)
    }

    fn read_lines(&self, handle: &PathBuf) -> io::Result<Vec<String>> {
        let bytes = fs::read(handle)?;
        Ok(String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect())
    }

    fn find_child(&self, dir: &PathBuf, name: &str) -> io::Result<Option<PathBuf>> {
        let candidate = dir.join(name);
        match fs::symlink_metadata(&candidate) {
            Ok(_) => Ok(Some(candidate)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(windows)]
fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[cfg(not(windows))]
fn slash_path(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_children_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.txt"), "").unwrap();
        fs::create_dir(dir.path().join("c")).unwrap();

        let provider = FsProvider::new();
        let names: Vec<_> = provider
            .children(&dir.path().to_path_buf())
            .unwrap()
            .iter()
            .map(|c| provider.name(c))
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c"]);
    }

    #[test]
    fn test_is_container() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, "").unwrap();

        let provider = FsProvider::new();
        assert!(provider.is_container(&dir.path().to_path_buf()));
        assert!(!provider.is_container(&file));
        assert!(!provider.is_container(&dir.path().join("missing")));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_a_leaf() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(dir.path().join("real"), &link).unwrap();

        assert!(!FsProvider::new().is_container(&link));
    }

    #[test]
    fn test_children_of_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");
        assert!(FsProvider::new().children(&missing).is_err());
    }

    #[test]
    fn test_find_child_and_read_lines() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".gitignore"), "target/\n*.log\n").unwrap();

        let provider = FsProvider::new();
        let root = dir.path().to_path_buf();
        let found = provider.find_child(&root, ".gitignore").unwrap().unwrap();
        assert_eq!(provider.read_lines(&found).unwrap(), vec!["target/", "*.log"]);
        assert!(provider.find_child(&root, "nope").unwrap().is_none());
    }

    #[test]
    fn test_read_lines_keeps_lines_after_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join(".gitignore");
        fs::write(&file, b"# caf\xe9\n*.log\n").unwrap();

        let lines = FsProvider::new().read_lines(&file).unwrap();
        assert_eq!(lines, vec!["# caf\u{FFFD}", "*.log"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_filesystem_root_name() {
        assert_eq!(FsProvider::new().name(&PathBuf::from("/")), "/");
    }
}
