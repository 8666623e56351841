//! Ignore patterns for one directory scope

use std::collections::BTreeMap;

use super::pattern::{Candidate, IgnorePattern};

/// A set of ignore patterns, unique by their exact (trimmed) text.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: BTreeMap<String, IgnorePattern>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse ignore-file lines: trim each, drop blanks and `#` comments.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for line in lines {
            set.insert(line.as_ref());
        }
        set
    }

    /// Add a pattern. Returns `false` for blank or comment lines and duplicates.
    pub fn insert(&mut self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || self.patterns.contains_key(line) {
            return false;
        }
        self.patterns.insert(line.to_string(), IgnorePattern::new(line));
        true
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.patterns.contains_key(pattern)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// The union of `self` and `other`, leaving both untouched.
    pub fn union(&self, other: &PatternSet) -> PatternSet {
        let mut merged = self.clone();
        for (raw, pattern) in &other.patterns {
            merged
                .patterns
                .entry(raw.clone())
                .or_insert_with(|| pattern.clone());
        }
        merged
    }

    /// First pattern matching the candidate, if any.
    pub fn first_match(&self, candidate: &Candidate<'_>) -> Option<&str> {
        self.patterns
            .values()
            .find(|p| p.matches(candidate))
            .map(IgnorePattern::as_str)
    }

    pub fn is_ignored(&self, candidate: &Candidate<'_>) -> bool {
        self.first_match(candidate).is_some()
    }
}
