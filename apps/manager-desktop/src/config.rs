//! Manager configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/netbird-manager/config.toml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Manager configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name notifications are tagged with.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Path or name of the `netbird` binary.
    #[serde(default = "default_netbird_binary")]
    pub netbird_binary: String,

    /// Seconds between background status refreshes.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,

    /// Timeout in seconds for status and profile queries.
    #[serde(default = "default_status_timeout")]
    pub status_timeout: u64,

    /// Timeout in seconds for `netbird up` / `netbird down`.
    #[serde(default = "default_action_timeout")]
    pub action_timeout: u64,

    /// Maximum number of concurrent background jobs.
    #[serde(default = "default_max_jobs")]
    pub max_jobs: usize,

    /// Tray icon while management is connected.
    #[serde(default = "default_connected_icon")]
    pub connected_icon: PathBuf,

    /// Tray icon otherwise.
    #[serde(default = "default_disconnected_icon")]
    pub disconnected_icon: PathBuf,
}

fn default_app_name() -> String {
    "Netbird Manager".into()
}

fn default_netbird_binary() -> String {
    netbird_manager_client::DEFAULT_BINARY.into()
}

fn default_refresh_interval() -> u64 {
    300
}

fn default_status_timeout() -> u64 {
    netbird_manager_client::DEFAULT_TIMEOUT.as_secs()
}

fn default_action_timeout() -> u64 {
    60
}

fn default_max_jobs() -> usize {
    2
}

fn default_connected_icon() -> PathBuf {
    config_dir().join("netbird.png")
}

fn default_disconnected_icon() -> PathBuf {
    config_dir().join("netbird-grey.png")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: default_app_name(),
            netbird_binary: default_netbird_binary(),
            refresh_interval: default_refresh_interval(),
            status_timeout: default_status_timeout(),
            action_timeout: default_action_timeout(),
            max_jobs: default_max_jobs(),
            connected_icon: default_connected_icon(),
            disconnected_icon: default_disconnected_icon(),
        }
    }
}

impl Config {
    /// Loads configuration from `path` (or the default location), creating
    /// a default file if none exists.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_path(),
        };

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            tracing::debug!(path = %path.display(), "configuration loaded");
            Ok(config)
        } else {
            let config = Config::default();
            config.save(&path)?;
            Ok(config)
        }
    }

    /// Saves the current configuration to `path`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval.max(1))
    }

    pub fn status_timeout(&self) -> Duration {
        Duration::from_secs(self.status_timeout.max(1))
    }

    pub fn action_timeout(&self) -> Duration {
        Duration::from_secs(self.action_timeout.max(1))
    }
}

/// Returns the configuration directory.
fn config_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home).join(".config").join("netbird-manager")
}

/// Returns the configuration file path.
fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}
