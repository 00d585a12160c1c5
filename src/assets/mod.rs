//! Static asset responder
//!
//! Resolves a relative request path against an ordered list of mount rules,
//! reads the first regular file found and describes how to serve it.

mod error;
pub mod fs;
pub mod request;
pub mod rules;

pub use error::AssetError;
pub use fs::{AssetFs, LocalFs};
pub use rules::MountRule;

use crate::http::{cache::CachePolicy, mime};
use hyper::body::Bytes;
use std::path::PathBuf;

/// A file located and read for a request
#[derive(Debug, Clone)]
pub struct ServedAsset {
    /// Location the content was read from
    pub path: PathBuf,
    pub content: Bytes,
    pub content_type: &'static str,
    pub cache_control: String,
}

impl ServedAsset {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Debug)]
pub struct StaticAssetResponder<F = LocalFs> {
    rules: Vec<MountRule>,
    cache: CachePolicy,
    fs: F,
}

impl StaticAssetResponder<LocalFs> {
    pub const fn new(rules: Vec<MountRule>, cache: CachePolicy) -> Self {
        Self::with_fs(rules, cache, LocalFs)
    }
}

impl<F: AssetFs> StaticAssetResponder<F> {
    pub const fn with_fs(rules: Vec<MountRule>, cache: CachePolicy, fs: F) -> Self {
        Self { rules, cache, fs }
    }

    pub fn rules(&self) -> &[MountRule] {
        &self.rules
    }

    pub const fn fs(&self) -> &F {
        &self.fs
    }

    /// Serve `path`, already stripped of its leading slash and decoded.
    ///
    /// Validation happens before any filesystem call. Candidates are tried
    /// in rule order and the first regular file wins.
    pub async fn serve(&self, path: &str) -> Result<ServedAsset, AssetError> {
        request::validate(path)?;

        for candidate in rules::candidates(&self.rules, path) {
            if !self.fs.is_file(&candidate).await {
                continue;
            }

            let content = self
                .fs
                .read(&candidate)
                .await
                .map_err(|source| AssetError::Read {
                    path: candidate.clone(),
                    source,
                })?;

            return Ok(ServedAsset {
                content_type: mime::content_type_for(&candidate),
                cache_control: self.cache.header_value(),
                content: Bytes::from(content),
                path: candidate,
            });
        }

        Err(AssetError::NotFound(path.to_string()))
    }
}
