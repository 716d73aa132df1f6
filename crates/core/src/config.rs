//! Application configuration.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{anyhow, Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::trailer::DEFAULT_TRAILER_SEARCH_URL;

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = "gamescreen";
const CONFIG_FILE_NAME: &str = "config.toml";
const ENV_PREFIX: &str = "GAMESCREEN";
const DEFAULT_TICK_RATE_MS: u64 = 250;

const DEFAULT_CONFIG_TOML: &str = r#"# gamescreen configuration

# JSON catalog to display. Leave unset to use the bundled catalog.
# catalog_path = "/path/to/games.json"

# Prefix for trailer searches; the encoded "<name> trailer" query is appended.
trailer_search_url = "https://www.youtube.com/results?search_query="

# Directory for gamescreen.log. Defaults to ./logs.
# log_dir = "/tmp/gamescreen-logs"

# Input poll interval in milliseconds.
tick_rate_ms = 250
"#;

/// Settings resolved from defaults, the config file and `GAMESCREEN_*` variables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Optional path to a JSON catalog.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Base URL that trailer queries are appended to.
    pub trailer_search_url: String,
    /// Directory for log files.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Input poll interval in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            trailer_search_url: DEFAULT_TRAILER_SEARCH_URL.to_string(),
            log_dir: None,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}

impl AppConfig {
    /// Load from the default config file (if present) plus environment overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path().as_deref())
    }

    /// Load using `path` as the optional config file.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    fn load_with_prefix(path: Option<&Path>, env_prefix: &str) -> Result<Self> {
        let defaults = AppConfig::default();
        let mut builder = Config::builder()
            .set_default("trailer_search_url", defaults.trailer_search_url)?
            .set_default("tick_rate_ms", defaults.tick_rate_ms as i64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
        }

        builder = builder.add_source(Environment::with_prefix(env_prefix).try_parsing(true));

        let config: AppConfig = builder
            .build()
            .context("failed to build configuration")?
            .try_deserialize()
            .map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.trailer_search_url.trim().is_empty() {
            return Err(anyhow!("trailer_search_url must not be empty"));
        }
        if self.tick_rate_ms == 0 {
            return Err(anyhow!("tick_rate_ms must be greater than zero"));
        }
        Ok(())
    }

    /// Input poll interval.
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }

    /// Directory for log files, falling back to `./logs`.
    pub fn resolved_log_dir(&self) -> Result<PathBuf> {
        match &self.log_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(std::env::current_dir()
                .context("failed to determine current directory")?
                .join("logs")),
        }
    }
}

/// `<config_dir>/gamescreen/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Write the commented default config file if none exists yet.
pub fn ensure_default_config() -> Result<()> {
    match default_config_path() {
        Some(path) => write_default_config(&path),
        None => Ok(()),
    }
}

/// Write the default config to `path` unless it already exists.
pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("failed to write default config {}", path.display()))?;
    info!(path = %path.display(), "Wrote default configuration");
    Ok(())
}
