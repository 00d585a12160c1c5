//! Logger module
//!
//! Provides logging utilities for the server:
//! - Subscriber setup from the logging config
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Asset rejection, store and error logging

mod format;

pub use format::AccessLogEntry;

use crate::assets::AssetError;
use crate::config::{Config, LoggingConfig};
use crate::store::StoreError;
use std::fs::{File, OpenOptions};
use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

/// Target used for access log lines, so they can be filtered separately
pub const ACCESS_TARGET: &str = "access";

#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("Invalid log filter '{directives}': {source}")]
    Filter {
        directives: String,
        #[source]
        source: ParseError,
    },

    #[error("Cannot open log file: {0}")]
    File(#[from] io::Error),

    #[error("Logging already initialized: {0}")]
    Install(#[from] TryInitError),
}

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` overrides `logging.level` when set. Should be called once at
/// application startup.
pub fn init(config: &LoggingConfig) -> Result<(), LogInitError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let builder = tracing_subscriber::fmt().with_env_filter(build_filter(env, &config.level)?);

    match config.log_file.as_deref() {
        Some(path) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(open_log_file(path)?))
            .finish()
            .try_init()?,
        None => builder.finish().try_init()?,
    }
    Ok(())
}

/// Parse the filter directives, rejecting any that do not parse
fn build_filter(env: Option<String>, level: &str) -> Result<EnvFilter, LogInitError> {
    let directives = env
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| level.to_string());
    EnvFilter::try_new(&directives).map_err(|source| LogInitError::Filter { directives, source })
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!("Asset server listening on http://{addr}");
    tracing::info!(log_level = %config.logging.level, "Logging configured");
    if let Some(workers) = config.server.workers {
        tracing::info!(workers, "Worker threads");
    }
    if let Some(ref path) = config.logging.log_file {
        tracing::info!(path = %path, "Log file");
    }
    if config.content.enabled {
        tracing::info!("Content routes enabled: /portfolio/, /personalities/, /booking/");
    }
    for (priority, rule) in config.asset_rules().iter().enumerate() {
        tracing::info!(
            priority,
            prefix = %rule.prefix,
            root = %rule.root.display(),
            strip_prefix = rule.strip_prefix,
            "Asset mount"
        );
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!(%peer_addr, "Connection accepted");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::warn!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// Log why an asset request ended in 404
///
/// Rejections are suspicious, a missing file is routine, a failed read
/// means the deployment is broken.
pub fn log_asset_error(err: &AssetError) {
    match err {
        AssetError::Traversal(_) | AssetError::Absolute(_) | AssetError::Malformed(_) => {
            tracing::warn!(error = %err, "Asset request rejected");
        }
        AssetError::NotFound(_) => tracing::debug!(error = %err, "Asset not found"),
        AssetError::Read { .. } => tracing::error!(error = %err, "Asset read failed"),
    }
}

/// Log why a content request failed
pub fn log_store_error(err: &StoreError) {
    match err {
        StoreError::NotFound { .. } => tracing::debug!(error = %err, "Record not found"),
        _ => tracing::warn!(error = %err, "Content request rejected"),
    }
}

pub fn log_method_rejected(method: &hyper::Method, path: &str) {
    tracing::debug!(%method, path, "Method not allowed on asset route");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: ACCESS_TARGET, "{}", entry.format(format));
}

pub fn log_shutdown(active_connections: usize) {
    tracing::info!(active_connections, "Shutting down, no longer accepting connections");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_level() {
        assert!(build_filter(None, "info").is_ok());
        assert!(build_filter(None, "studio_assets=debug,access=info").is_ok());
    }

    #[test]
    fn test_invalid_level_is_an_error() {
        match build_filter(None, "studio_assets=loud") {
            Err(LogInitError::Filter { directives, .. }) => {
                assert_eq!(directives, "studio_assets=loud");
            }
            other => panic!("expected a filter error, got {other:?}"),
        }
    }

    #[test]
    fn test_env_overrides_level() {
        let err = build_filter(Some("access=nope".into()), "info").unwrap_err();
        assert!(err.to_string().contains("access=nope"));
        assert!(build_filter(Some(String::new()), "info").is_ok());
    }
}
