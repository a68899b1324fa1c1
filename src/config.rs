use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;
use stopwatch_core::DEFAULT_SHARE_LINK;
use thiserror::Error;

const CONFIG_ENV: &str = "STOPWATCH_CONFIG";
const APP_DIR: &str = "stopwatch";
const CONFIG_FILE: &str = "config.toml";
const LOG_FILE: &str = "stopwatch.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path:?} (invalid TOML): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("invalid config value: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareKind {
    #[default]
    Clipboard,
    File,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    pub target: ShareKind,
    /// Destination for `target = "file"`.
    pub path: Option<PathBuf>,
    pub link: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            target: ShareKind::Clipboard,
            path: None,
            link: String::from(DEFAULT_SHARE_LINK),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_file: PathBuf,
    pub share: ShareConfig,

    /// File the config was read from, `None` when running on defaults.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: String::from("info"),
            log_file: env::temp_dir().join(LOG_FILE),
            share: ShareConfig::default(),
            source: None,
        }
    }
}

impl Config {
    /// Load from `$STOPWATCH_CONFIG`, else the per-user config directory.
    /// A missing file is not an error.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.level_filter()?;
        if self.share.target == ShareKind::File && self.share.path.is_none() {
            return Err(ConfigError::Invalid(String::from(
                "share.path is required when share.target = \"file\"",
            )));
        }
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("unknown log_level {:?}", self.log_level)))
    }
}
