//! A single ignore pattern and the rules it is matched with

use regex::Regex;

/// What an ignore pattern is tested against.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Base name of the entry.
    pub name: &'a str,
    pub is_container: bool,
    /// Path relative to the walk's root, `/`-prefixed and `/`-separated.
    pub relative_path: &'a str,
}

/// A parsed ignore pattern.
///
/// A candidate matches when any of these holds:
/// 1. the pattern equals the base name;
/// 2. the pattern is `name/`, the candidate is a container named `name`;
/// 3. the pattern contains `*` and, as a glob over the whole base name,
///    matches it (`*` is any sequence, everything else is literal);
/// 4. the pattern starts with `/` or `./` and is a prefix of the
///    root-relative path.
#[derive(Debug, Clone)]
pub struct IgnorePattern {
    raw: String,
    dir_name: Option<String>,
    wildcard: Option<Regex>,
    anchor: Option<String>,
}

impl IgnorePattern {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();

        let dir_name = raw.strip_suffix('/').map(str::to_string);

        let wildcard = if raw.contains('*') {
            match Regex::new(&glob_to_regex(&raw)) {
                Ok(re) => Some(re),
                Err(e) => {
                    tracing::warn!(pattern = %raw, error = %e, "skipping wildcard rule");
                    None
                }
            }
        } else {
            None
        };

        let anchor = if let Some(rest) = raw.strip_prefix("./") {
            Some(format!("/{rest}"))
        } else if raw.starts_with('/') {
            Some(raw.clone())
        } else {
            None
        };

        Self {
            raw,
            dir_name,
            wildcard,
            anchor,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, candidate: &Candidate<'_>) -> bool {
        if self.raw == candidate.name {
            return true;
        }

        if candidate.is_container && self.dir_name.as_deref() == Some(candidate.name) {
            return true;
        }

        if let Some(re) = &self.wildcard {
            if re.is_match(candidate.name) {
                return true;
            }
        }

        if let Some(anchor) = &self.anchor {
            if candidate.relative_path.starts_with(anchor.as_str()) {
                return true;
            }
        }

        false
    }
}

/// Test one raw pattern against a candidate.
pub fn matches(pattern: &str, candidate: &Candidate<'_>) -> bool {
    IgnorePattern::new(pattern).matches(candidate)
}

/// Anchored regex for a `*` glob; every other character is literal.
fn glob_to_regex(pattern: &str) -> String {
    let body: Vec<String> = pattern.split('*').map(regex::escape).collect();
    format!("^{}$", body.join(".*"))
}
