//! Configuration management.
//!
//! TOML file with `[game]`, `[storage]`, `[gateway]` and `[logging]`
//! sections, loaded asynchronously and validated before the server starts.
//! Every timing tunable of the maintenance sweep lives here so operators can
//! tune the game pace without rebuilding.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Seconds a ReadyToFight entity waits before a bot is generated.
    #[serde(default = "default_ready_wait")]
    pub ready_wait_secs: i64,
    /// Seconds between single-point HP regeneration steps while idle.
    #[serde(default = "default_regen_interval")]
    pub regen_interval_secs: i64,
    /// UTC hour (0-23) opening the one-hour daily reset window.
    #[serde(default)]
    pub daily_reset_hour: u32,
    /// Seconds of inactivity before an entity leaves the active set.
    #[serde(default = "default_active_window")]
    pub active_window_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Milliseconds between maintenance sweeps.
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Local console identity used by `start` without a wired transport.
    #[serde(default = "default_console_id")]
    pub console_id: i64,
    #[serde(default = "default_console_name")]
    pub console_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_ready_wait() -> i64 {
    10
}
fn default_regen_interval() -> i64 {
    60
}
fn default_active_window() -> i64 {
    24 * 3600
}
fn default_data_dir() -> String {
    "data".to_string()
}
fn default_tick_ms() -> u64 {
    1_000
}
fn default_console_id() -> i64 {
    1
}
fn default_console_name() -> String {
    "console".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            ready_wait_secs: default_ready_wait(),
            regen_interval_secs: default_regen_interval(),
            daily_reset_hour: 0,
            active_window_secs: default_active_window(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            console_id: default_console_id(),
            console_name: default_console_name(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            storage: StorageConfig::default(),
            gateway: GatewayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate a configuration file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Write a commented default configuration, refusing to overwrite.
    pub async fn create_default(path: &str) -> Result<()> {
        if fs::try_exists(path).await? {
            return Err(anyhow!("config file already exists: {path}"));
        }
        let config = Config::default();
        let content = toml::to_string_pretty(&config)?;
        fs::write(path, content).await?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.game.ready_wait_secs < 1 {
            return Err(anyhow!("game.ready_wait_secs must be >= 1"));
        }
        if self.game.regen_interval_secs < 1 {
            return Err(anyhow!("game.regen_interval_secs must be >= 1"));
        }
        if self.game.daily_reset_hour > 23 {
            return Err(anyhow!("game.daily_reset_hour must be 0-23"));
        }
        if self.game.active_window_secs < 60 {
            return Err(anyhow!("game.active_window_secs must be >= 60"));
        }
        if self.gateway.tick_ms < 50 {
            return Err(anyhow!("gateway.tick_ms must be >= 50"));
        }
        if self.gateway.console_id <= 0 {
            return Err(anyhow!("gateway.console_id must be positive"));
        }
        if self.storage.data_dir.trim().is_empty() {
            return Err(anyhow!("storage.data_dir must not be empty"));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(anyhow!("unknown logging.level: {other}")),
        }
    }
}
