//! Configuration for the `taskboard` server.
//!
//! Settings are layered with the following priority (highest first):
//! 1. CLI arguments
//! 2. Environment variables (via clap `env` attribute)
//! 3. TOML config file given with `--config`
//! 4. Compiled defaults

use std::path::{Path, PathBuf};

use crate::store::StoreConfig;
use crate::task::domain::TransitionPolicy;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/taskboard";
const DEFAULT_MAX_POOL_SIZE: u32 = 8;
const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse the TOML configuration.
    #[error("failed to parse config file: {0}")]
    ParseToml(#[from] toml::de::Error),
}

// TOML file layout; every field is optional so files may override a subset.

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ConfigFile {
    server: ServerFileConfig,
    store: StoreFileConfig,
    lifecycle: LifecycleFileConfig,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct ServerFileConfig {
    bind_addr: Option<String>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct StoreFileConfig {
    database_url: Option<String>,
    max_pool_size: Option<u32>,
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
struct LifecycleFileConfig {
    transition_policy: Option<TransitionPolicy>,
}

/// CLI arguments for the server.
#[derive(clap::Parser, Debug, Default)]
#[command(version, about = "Taskboard task-tracking server")]
pub struct CliArgs {
    /// Address to bind the HTTP server to.
    #[arg(short, long, env = "TASKBOARD_BIND")]
    pub bind: Option<String>,

    /// Path to a TOML config file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// `PostgreSQL` connection URL.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum number of pooled database connections.
    #[arg(long)]
    pub max_pool_size: Option<u32>,

    /// Whether status changes are checked against the transition table
    /// (`enforced` or `unchecked`).
    #[arg(long)]
    pub transition_policy: Option<TransitionPolicy>,

    /// Log level filter (trace, debug, info, warn, error).
    #[arg(long, default_value = DEFAULT_LOG_LEVEL, env = "TASKBOARD_LOG")]
    pub log_level: String,
}

/// Fully resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Address to bind the server to (e.g., `0.0.0.0:3000`).
    pub bind_addr: String,
    /// Record store connection settings.
    pub store: StoreConfig,
    /// Status transition policy for the lifecycle service.
    pub transition_policy: TransitionPolicy,
    /// Log level filter string.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_owned(),
            store: StoreConfig {
                database_url: DEFAULT_DATABASE_URL.to_owned(),
                max_pool_size: DEFAULT_MAX_POOL_SIZE,
            },
            transition_policy: TransitionPolicy::default(),
            log_level: DEFAULT_LOG_LEVEL.to_owned(),
        }
    }
}

impl AppConfig {
    /// Loads configuration by merging CLI args, env vars, and the optional
    /// TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config file named by `--config` cannot
    /// be read or parsed.
    pub fn load(cli: &CliArgs) -> Result<Self, ConfigError> {
        let file = load_config_file(cli.config.as_deref())?;
        Ok(Self::resolve(cli, file))
    }

    /// Priority: CLI > file > default.
    fn resolve(cli: &CliArgs, file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            bind_addr: cli
                .bind
                .clone()
                .or(file.server.bind_addr)
                .unwrap_or(defaults.bind_addr),
            store: StoreConfig {
                database_url: cli
                    .database_url
                    .clone()
                    .or(file.store.database_url)
                    .unwrap_or(defaults.store.database_url),
                max_pool_size: cli
                    .max_pool_size
                    .or(file.store.max_pool_size)
                    .unwrap_or(defaults.store.max_pool_size),
            },
            transition_policy: cli
                .transition_policy
                .or(file.lifecycle.transition_policy)
                .unwrap_or(defaults.transition_policy),
            log_level: cli.log_level.clone(),
        }
    }
}

fn load_config_file(explicit_path: Option<&Path>) -> Result<ConfigFile, ConfigError> {
    let Some(path) = explicit_path else {
        return Ok(ConfigFile::default());
    };
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&contents)?)
}
