use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_STORE_PATH: &str = "wiezen-game.json";
const DEFAULT_LOG_PATH: &str = "wiezen-log.jsonl";

/// Root scorekeeper configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct ScorekeeperConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub players: PlayersConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScorekeeperConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: ScorekeeperConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        self.store.validate()?;
        self.players.validate()?;
        self.logging.normalize();
        self.logging.validate()?;
        Ok(())
    }
}

/// Where the single saved game lives.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl StoreConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "store.path".to_string(),
                message: "path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

/// Names used when a fresh game is started.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct PlayersConfig {
    #[serde(default)]
    pub names: Option<Vec<String>>,
}

impl PlayersConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        let Some(names) = self.names.as_ref() else {
            return Ok(());
        };

        if names.len() != 4 {
            return Err(ValidationError::InvalidField {
                field: "players.names".to_string(),
                message: format!("expected 4 names, got {}", names.len()),
            });
        }

        if let Some(index) = names.iter().position(|name| name.trim().is_empty()) {
            return Err(ValidationError::InvalidField {
                field: format!("players.names[{index}]"),
                message: "name must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn names(&self) -> Option<[String; 4]> {
        self.names.clone()?.try_into().ok()
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            log_path: default_log_path(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        if self.enable_structured && self.log_path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "logging.log_path".to_string(),
                message: "structured logging needs a file path".to_string(),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
