//! Error types shared by the selection model, the ignore engine and the builder

use std::io;

use thiserror::Error;

/// Errors produced by treemark.
#[derive(Debug, Error)]
pub enum Error {
    /// A state-setting call received a value that is not a settable check state.
    #[error("invalid check state: {0}")]
    InvalidState(u8),

    /// Listing a directory or reading an ignore file failed.
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A slash-separated path did not resolve to a node in the tree.
    #[error("no such node in tree: {0}")]
    UnknownPath(String),
}

impl Error {
    pub fn io(path: impl Into<String>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
