// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub assets: AssetsConfig,
    pub health: HealthConfig,
    pub content: ContentConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `studio_assets=debug,access=info`
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Log file path (optional, stdout if not set)
    #[serde(default)]
    pub log_file: Option<String>,
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Seconds a connection may stay open before it is dropped
    pub connection_timeout: u64,
    #[serde(default)]
    pub max_connections: Option<u64>,
}

/// Candidate roots for static assets
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    /// Collected/compiled static root
    pub collected_root: String,
    /// Project source static directory
    pub project_root: String,
    /// Framework admin assets, searched first for `admin_prefix` requests
    #[serde(default)]
    pub admin_root: Option<String>,
    pub admin_prefix: String,
    /// `Cache-Control` max-age for every served asset, in seconds
    pub cache_max_age: u32,
    /// Extra rules, searched after the built-in roots
    #[serde(default)]
    pub mounts: Vec<MountConfig>,
}

/// One extra mount rule
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct MountConfig {
    #[serde(default)]
    pub prefix: String,
    pub root: String,
    #[serde(default)]
    pub strip_prefix: bool,
}

/// Health check configuration
///
/// The path is matched before asset lookup and shadows any file there.
#[derive(Debug, Deserialize, Clone)]
pub struct HealthConfig {
    pub enabled: bool,
    pub path: String,
}

/// JSON content routes (`/portfolio`, `/booking`, `/personalities`)
#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    /// When off, those paths fall through to the asset roots
    pub enabled: bool,
    /// Largest accepted booking body, in bytes
    pub max_body_bytes: usize,
}
