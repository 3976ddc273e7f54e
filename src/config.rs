// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration management
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `VERSION_MANAGEMENT_*` environment variables (`__` separates nested keys,
//! e.g. `VERSION_MANAGEMENT_SERVER__PORT=8080`).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "VERSION_MANAGEMENT";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for persistent data (the database file)
    pub data_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// HTTP server settings
    pub server: ServerSettings,
    /// Database settings
    pub database: DatabaseSettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Address to bind
    pub host: String,
    /// Port to bind
    pub port: u16,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite connection URL; defaults to a file in `data_dir`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Connection pool size
    pub max_connections: u32,
    /// How long a writer waits for the database lock
    pub busy_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: "info".to_string(),
            server: ServerSettings::default(),
            database: DatabaseSettings::default(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
            busy_timeout_ms: 5_000,
        }
    }
}

impl Config {
    /// Path of the SQLite database file used when no URL is configured
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join("version-management.db")
    }

    /// Look up a single setting by dotted key (e.g. `server.port`)
    pub fn get(&self, key: &str) -> Result<String> {
        let mut value = serde_json::to_value(self).context("Failed to serialize configuration")?;
        for part in key.split('.') {
            value = value
                .get(part)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("Unknown configuration key: {}", key))?;
        }
        Ok(match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        })
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "hyperpolymath", "version-management")
        .map(|d| d.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".version-management"))
}

/// Load configuration from defaults, an optional file, and the environment
pub fn load(path: Option<&Path>) -> Result<Config> {
    let mut builder = config::Config::builder().add_source(
        config::Config::try_from(&Config::default()).context("Failed to build default configuration")?,
    );

    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path).required(true));
    }

    builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to load configuration")?
        .try_deserialize()
        .context("Invalid configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.url.is_none());
        assert!(config.database_path().ends_with("version-management.db"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
log_level = "debug"

[server]
port = 8088

[database]
busy_timeout_ms = 250
"#,
        )
        .unwrap();

        let config = load(Some(&path)).unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.database.busy_timeout_ms, 250);
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        assert!(load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn test_get_dotted_key() {
        let config = Config::default();
        assert_eq!(config.get("server.port").unwrap(), "5000");
        assert_eq!(config.get("log_level").unwrap(), "info");
        assert!(config.get("server.nope").is_err());
    }
}
