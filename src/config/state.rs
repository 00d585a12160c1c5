// Application state module
// Shared between connection tasks

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use super::types::Config;
use crate::assets::{AssetFs, LocalFs, StaticAssetResponder};
use crate::store::ContentStore;

/// Application state
pub struct AppState<F = LocalFs> {
    pub config: Config,
    pub responder: StaticAssetResponder<F>,
    pub store: Arc<ContentStore>,
    pub active_connections: AtomicUsize,
}

impl AppState<LocalFs> {
    /// Build state with a responder over the real filesystem and an empty
    /// content store
    pub fn new(config: Config) -> Self {
        let responder = StaticAssetResponder::new(config.asset_rules(), config.cache_policy());
        Self::with_responder(config, responder)
    }
}

impl<F: AssetFs> AppState<F> {
    pub fn with_responder(config: Config, responder: StaticAssetResponder<F>) -> Self {
        Self {
            config,
            responder,
            store: Arc::new(ContentStore::new()),
            active_connections: AtomicUsize::new(0),
        }
    }
}
