//! Filesystem access used by the responder
//!
//! Kept behind a trait so tests can count and fake lookups.

use std::future::Future;
use std::io;
use std::path::Path;

use tokio::fs;

pub trait AssetFs: Send + Sync {
    /// Whether `path` names a regular file (directories never match)
    fn is_file(&self, path: &Path) -> impl Future<Output = bool> + Send;

    /// Read the whole file
    fn read(&self, path: &Path) -> impl Future<Output = io::Result<Vec<u8>>> + Send;
}

/// The real filesystem, through `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl AssetFs for LocalFs {
    async fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path)
            .await
            .is_ok_and(|metadata| metadata.is_file())
    }

    async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path).await
    }
}

#[cfg(test)]
pub mod testing {
    use super::AssetFs;
    use std::collections::HashMap;
    use std::io;
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// In-memory filesystem that counts every call made against it
    #[derive(Debug, Default)]
    pub struct RecordingFs {
        files: HashMap<PathBuf, Vec<u8>>,
        unreadable: Vec<PathBuf>,
        calls: AtomicUsize,
    }

    impl RecordingFs {
        pub fn with_file(mut self, path: impl Into<PathBuf>, content: &[u8]) -> Self {
            self.files.insert(path.into(), content.to_vec());
            self
        }

        /// Listed as a file, but reading it fails
        pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
            let path = path.into();
            self.files.insert(path.clone(), Vec::new());
            self.unreadable.push(path);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl AssetFs for RecordingFs {
        async fn is_file(&self, path: &Path) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.files.contains_key(path)
        }

        async fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unreadable.iter().any(|p| p == path) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "vanished"))
        }
    }
}
