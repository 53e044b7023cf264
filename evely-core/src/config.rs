//! Global evely configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_NOTICE_SECS, DEFAULT_WATCH_INTERVAL_MS};
use crate::error::{EvelyError, EvelyResult};

static DEFAULT_STORAGE_PATH: &str = "~/.evely";

fn default_storage_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORAGE_PATH)
}

fn default_notice_secs() -> u64 {
    DEFAULT_NOTICE_SECS
}

fn default_watch_interval_ms() -> u64 {
    DEFAULT_WATCH_INTERVAL_MS
}

/// Global configuration at ~/.config/evely/config.toml
///
/// Every option can be overridden with an `EVELY_` environment variable,
/// e.g. `EVELY_STORAGE_DIR=/tmp/evely`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EvelyConfig {
    #[serde(default = "default_storage_path")]
    pub storage_dir: PathBuf,

    #[serde(default = "default_notice_secs")]
    pub notice_secs: u64,

    #[serde(default = "default_watch_interval_ms")]
    pub watch_interval_ms: u64,
}

impl Default for EvelyConfig {
    fn default() -> Self {
        EvelyConfig {
            storage_dir: default_storage_path(),
            notice_secs: default_notice_secs(),
            watch_interval_ms: default_watch_interval_ms(),
        }
    }
}

impl EvelyConfig {
    pub fn config_path() -> EvelyResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EvelyError::Config("Could not determine config directory".into()))?
            .join("evely");

        Ok(config_dir.join("config.toml"))
    }

    /// Load ~/.config/evely/config.toml, creating a commented-out default on first run.
    pub fn load() -> EvelyResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> EvelyResult<Self> {
        Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("EVELY").try_parsing(true))
            .build()
            .map_err(|e| EvelyError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EvelyError::Config(e.to_string()))
    }

    /// Storage directory with `~` expanded.
    pub fn storage_path(&self) -> PathBuf {
        let full_path_str =
            shellexpand::tilde(&self.storage_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn notice_delay(&self) -> Duration {
        Duration::from_secs(self.notice_secs)
    }

    pub fn watch_interval(&self) -> Duration {
        Duration::from_millis(self.watch_interval_ms.max(1))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EvelyResult<()> {
        let contents = format!(
            "\
# evely configuration

# Where stored records live (one JSON file per key):
# storage_dir = \"{}\"

# Seconds a success notice stays on screen:
# notice_secs = {}

# How often `evely admin watch` checks for changes from other processes:
# watch_interval_ms = {}
",
            DEFAULT_STORAGE_PATH, DEFAULT_NOTICE_SECS, DEFAULT_WATCH_INTERVAL_MS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EvelyError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EvelyError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
