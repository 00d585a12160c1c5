// Configuration module entry point
// Loads the layered configuration and derives the asset mount rules

mod state;
mod types;

use std::net::{AddrParseError, SocketAddr};

use ::config::builder::{ConfigBuilder, DefaultState};
use ::config::ConfigError;

use crate::assets::MountRule;
use crate::http::cache::CachePolicy;

// Re-export public types
pub use state::AppState;
pub use types::{
    AssetsConfig, Config, ContentConfig, HealthConfig, LoggingConfig, MountConfig,
    PerformanceConfig, ServerConfig,
};

/// Environment variable prefix, e.g. `STUDIO__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "STUDIO";

impl Config {
    /// Load configuration from specified file path (extension optional)
    ///
    /// The file is optional. Environment variables override the file and
    /// defaults fill whatever neither sets.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(config_path, None)
    }

    /// Like [`Config::load_from`], reading overrides from `env` instead of
    /// the process environment when given
    fn load_with_env(
        config_path: &str,
        env: Option<::config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        Self::defaults_builder()?
            .add_source(::config::File::with_name(config_path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }

    /// Configuration made of defaults only
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::defaults_builder()?.build()?.try_deserialize()
    }

    fn defaults_builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        ::config::Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 60)?
            .set_default("assets.collected_root", "staticfiles")?
            .set_default("assets.project_root", "static")?
            .set_default("assets.admin_prefix", "admin/")?
            .set_default("assets.cache_max_age", 31_536_000)?
            .set_default("health.enabled", true)?
            .set_default("health.path", "/healthz")?
            .set_default("content.enabled", true)?
            .set_default("content.max_body_bytes", 16 * 1024)
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    /// Ordered mount rules: admin root (if any), collected root, project
    /// root, then configured extras
    pub fn asset_rules(&self) -> Vec<MountRule> {
        let assets = &self.assets;
        let admin = assets
            .admin_root
            .as_ref()
            .map(|root| MountRule::stripped(assets.admin_prefix.as_str(), root.as_str()));
        let extras = assets.mounts.iter().map(|m| MountRule {
            prefix: m.prefix.clone(),
            root: m.root.clone().into(),
            strip_prefix: m.strip_prefix,
        });

        admin
            .into_iter()
            .chain([
                MountRule::catch_all(assets.collected_root.as_str()),
                MountRule::catch_all(assets.project_root.as_str()),
            ])
            .chain(extras)
            .collect()
    }

    pub const fn cache_policy(&self) -> CachePolicy {
        CachePolicy::public(self.assets.cache_max_age)
    }
}
