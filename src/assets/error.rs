//! Asset resolution errors
//!
//! Every variant maps to the same `404 Not Found` on the wire. The variants
//! exist so the cause can be logged.

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("path contains a parent-directory segment: {0}")]
    Traversal(String),

    #[error("path is absolute: {0}")]
    Absolute(String),

    #[error("path is malformed: {0}")]
    Malformed(String),

    #[error("no candidate root holds '{0}'")]
    NotFound(String),

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AssetError {
    /// Whether the request was refused before any filesystem access
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Traversal(_) | Self::Absolute(_) | Self::Malformed(_)
        )
    }
}
