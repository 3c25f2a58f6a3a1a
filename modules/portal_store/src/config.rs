//! Configuration for the portal store
//!
//! Layered with figment: built-in defaults, then an optional YAML file, then
//! `PORTAL_`-prefixed environment variables (`__` separates nested keys, e.g.
//! `PORTAL_DATABASE__URL`).

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "PORTAL_";

/// Portal store configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Database connection settings
    #[serde(default)]
    pub database: DatabaseConfig,

    /// `tracing` filter directive; `RUST_LOG` wins when unset
    #[serde(default)]
    pub log_filter: Option<String>,
}

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// Connection URL (postgres:// or sqlite:)
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Timeout for acquiring a connection, e.g. "5s"
    #[serde(default = "default_connect_timeout", with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// Log every statement through sqlx
    #[serde(default)]
    pub sqlx_logging: bool,

    /// Apply pending migrations on connect
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout: default_connect_timeout(),
            sqlx_logging: false,
            run_migrations: true,
        }
    }
}

impl Config {
    /// Load defaults, then `path` if given, then the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load portal store configuration")
    }
}

fn default_url() -> String {
    "sqlite::memory:".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_in_memory_sqlite() {
        let config = Config::default();

        assert_eq!(config.database.url, "sqlite::memory:");
        assert_eq!(config.database.connect_timeout, Duration::from_secs(5));
        assert!(config.database.run_migrations);
        assert!(config.log_filter.is_none());
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "database:\n  url: postgres://portal@localhost/portal\n  max_connections: 32\n  connect_timeout: 250ms\nlog_filter: portal_store=debug"
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.database.url, "postgres://portal@localhost/portal");
        assert_eq!(config.database.max_connections, 32);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.database.connect_timeout, Duration::from_millis(250));
        assert_eq!(config.log_filter.as_deref(), Some("portal_store=debug"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database:\n  hostname: db.internal").unwrap();

        assert!(Config::load(Some(file.path())).is_err());
    }
}
