use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::domain::TransitionTable;

pub const CONFIG_ENV: &str = "FIREDESK_CONFIG";
pub const API_BASE_ENV: &str = "FIREDESK_API_BASE_URL";
pub const BIND_ENV: &str = "FIREDESK_BIND";

/// Defaults, also the reference for `firedesk.toml`.
pub const DEFAULT_CONFIG: &str = r#"
[server]
bind = "127.0.0.1:8080"
max_workers = 8
database = "firedesk.sqlite3"
session_ttl_secs = 604800

[api]
base_url = "http://localhost:3000/api"
timeout_secs = 30

[lists]
page_size = 10

[workflow]
review_required = false
"#;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid setting {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub max_workers: usize,
    pub database: PathBuf,
    pub session_ttl_secs: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListsConfig {
    pub page_size: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    /// Rejected permits must go back to pending before approval.
    pub review_required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub api: ApiConfig,
    pub lists: ListsConfig,
    pub workflow: WorkflowConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".into(),
            max_workers: 8,
            database: PathBuf::from("firedesk.sqlite3"),
            session_ttl_secs: 7 * 24 * 60 * 60,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".into(),
            timeout_secs: 30,
        }
    }
}

impl Default for ListsConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

impl AppConfig {
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                key: "server.bind",
                message: e.to_string(),
            })
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }

    pub fn transition_table(&self) -> TransitionTable {
        if self.workflow.review_required {
            TransitionTable::reviewed()
        } else {
            TransitionTable::open()
        }
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(url) = env(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(bind) = env(BIND_ENV).filter(|v| !v.trim().is_empty()) {
            self.server.bind = bind;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.lists.page_size == 0 {
            return Err(ConfigError::Invalid {
                key: "lists.page_size",
                message: "must be at least 1".into(),
            });
        }
        if self.server.max_workers == 0 {
            return Err(ConfigError::Invalid {
                key: "server.max_workers",
                message: "must be at least 1".into(),
            });
        }
        self.bind_addr()?;
        Ok(())
    }
}

/// Load configuration.
///
/// Search order:
/// 1. `$FIREDESK_CONFIG`, or `firedesk.toml` in the working directory
/// 2. Falls back to the embedded defaults
///
/// `FIREDESK_API_BASE_URL` and `FIREDESK_BIND` override the file.
pub fn load() -> Result<AppConfig, ConfigError> {
    let path = std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("firedesk.toml"));
    load_from(&path, |k| std::env::var(k).ok())
}

pub fn load_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Result<AppConfig, ConfigError> {
    let mut config: AppConfig = if path.exists() {
        tracing::info!("Loading config from: {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents)?
    } else {
        tracing::info!("Using default embedded configuration");
        toml::from_str(DEFAULT_CONFIG)?
    };

    config.apply_env(env);
    config.validate()?;
    Ok(config)
}
