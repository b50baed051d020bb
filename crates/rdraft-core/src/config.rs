// Configuration loading and parsing (rdraft.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::catalog::Locale;

pub const CONFIG_FILE: &str = "rdraft.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub locale: Locale,
    pub catalog: CatalogConfig,
    pub reveal: RevealConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogConfig {
    pub ddragon_base_url: String,
    pub cdragon_base_url: String,
    pub request_timeout_secs: u64,
}

impl CatalogConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RevealConfig {
    pub slot_interval_ms: u64,
    pub roulette_ticks: u32,
    pub roulette_interval_ms: u64,
}

impl RevealConfig {
    pub fn slot_interval(&self) -> Duration {
        Duration::from_millis(self.slot_interval_ms)
    }

    pub fn roulette_interval(&self) -> Duration {
        Duration::from_millis(self.roulette_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AudioConfig {
    pub master_volume: f32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            locale: Locale::Fr,
            catalog: CatalogConfig {
                ddragon_base_url: "https://ddragon.leagueoflegends.com".into(),
                cdragon_base_url: "https://raw.communitydragon.org/latest".into(),
                request_timeout_secs: 10,
            },
            reveal: RevealConfig {
                slot_interval_ms: 1000,
                roulette_ticks: 15,
                roulette_interval_ms: 60,
            },
            audio: AudioConfig { master_volume: 0.5 },
        }
    }
}

// ---------------------------------------------------------------------------
// rdraft.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire rdraft.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    display: DisplaySection,
    catalog: CatalogConfig,
    reveal: RevealConfig,
    audio: AudioConfig,
}

#[derive(Debug, Clone, Deserialize)]
struct DisplaySection {
    locale: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/rdraft.toml` relative to `base_dir`.
///
/// Does not copy defaults; `load_config()` does.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&path, &text)
}

/// Parse and validate config text. `path` is only used in error messages.
pub fn parse_config(path: &Path, text: &str) -> Result<Config, ConfigError> {
    let file: ConfigFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let locale =
        Locale::from_code(&file.display.locale).ok_or_else(|| ConfigError::ValidationError {
            field: "display.locale".into(),
            message: format!("unknown locale '{}'", file.display.locale),
        })?;

    let config = Config {
        locale,
        catalog: file.catalog,
        reveal: file.reveal,
        audio: file.audio,
    };

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/rdraft.toml` to `config/rdraft.toml` when the latter is
/// missing. Returns the written path, or `None` if a config was already there.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = base_dir.join("config").join(CONFIG_FILE);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(CONFIG_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no config/{CONFIG_FILE} or defaults/{CONFIG_FILE} in {}; \
                 run from the project root",
                base_dir.display()
            ),
        });
    }

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", dir.display()),
        })?;
    }
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;

    Ok(Some(target))
}

/// Loads config relative to the current working directory, copying defaults
/// first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_file(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let urls: &[(&str, &str)] = &[
        ("catalog.ddragon_base_url", config.catalog.ddragon_base_url.as_str()),
        ("catalog.cdragon_base_url", config.catalog.cdragon_base_url.as_str()),
    ];
    for (name, url) in urls {
        if url.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must not be empty".into(),
            });
        }
    }

    let positive: &[(&str, u64)] = &[
        ("catalog.request_timeout_secs", config.catalog.request_timeout_secs),
        ("reveal.slot_interval_ms", config.reveal.slot_interval_ms),
        ("reveal.roulette_interval_ms", config.reveal.roulette_interval_ms),
    ];
    for (name, val) in positive {
        if *val == 0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: "must be greater than 0".into(),
            });
        }
    }

    let volume = config.audio.master_volume;
    if !(0.0..=1.0).contains(&volume) {
        return Err(ConfigError::ValidationError {
            field: "audio.master_volume".into(),
            message: format!("must be between 0.0 and 1.0 inclusive, got {volume}"),
        });
    }

    Ok(())
}
