// Configuration loading and parsing (config/board.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default board.toml, written to config/ when no config exists yet.
pub const DEFAULT_BOARD_TOML: &str = include_str!("../defaults/board.toml");

/// Page sizes the roster table offers.
pub const PAGE_SIZES: [usize; 4] = [10, 25, 50, 100];

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

    #[error("failed to write default config: {message}")]
    DefaultsWriteError { message: String },
}

// ---------------------------------------------------------------------------
// board.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    pub dataset: DatasetConfig,
    pub table: TableConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// Relative paths resolve against the directory the board runs from.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub page_size: usize,
    pub rank_scale_min: f64,
    pub rank_scale_max: f64,
    /// Column keys hidden at startup.
    #[serde(default)]
    pub hidden_columns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: "hoopscout=info,hoopscout_core=info,warn".to_string(),
        }
    }
}

impl BoardConfig {
    /// Replace the dataset path, e.g. from a command-line argument.
    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset.path = path.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Load and validate `config/board.toml` under `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<BoardConfig, ConfigError> {
    let path = base_dir.join("config").join("board.toml");
    let text = read_file(&path)?;
    let config = parse_config(&text, &path)?;
    validate(&config)?;
    Ok(config)
}

/// Parse board.toml text without validating it.
pub fn parse_config(text: &str, path: &Path) -> Result<BoardConfig, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write the default board.toml into `base_dir/config/` if it is missing.
/// Returns the path written, or `None` when a config already existed.
pub fn ensure_config_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let config_dir = base_dir.join("config");
    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsWriteError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let target = config_dir.join("board.toml");
    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, DEFAULT_BOARD_TOML.as_bytes()).map_err(|e| {
                ConfigError::DefaultsWriteError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(Some(target))
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(None),
        Err(e) => Err(ConfigError::DefaultsWriteError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

/// Convenience wrapper: loads config relative to the current working directory.
/// Writes the default config first when none exists.
pub fn load_config() -> Result<BoardConfig, ConfigError> {
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

pub fn validate(config: &BoardConfig) -> Result<(), ConfigError> {
    if config.dataset.path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "dataset.path".into(),
            message: "must not be empty".into(),
        });
    }

    let table = &config.table;
    if !PAGE_SIZES.contains(&table.page_size) {
        return Err(ConfigError::ValidationError {
            field: "table.page_size".into(),
            message: format!("must be one of {PAGE_SIZES:?}, got {}", table.page_size),
        });
    }

    let scale_fields: &[(&str, f64)] = &[
        ("table.rank_scale_min", table.rank_scale_min),
        ("table.rank_scale_max", table.rank_scale_max),
    ];
    for (name, val) in scale_fields {
        if !val.is_finite() {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be a finite number, got {val}"),
            });
        }
    }
    if table.rank_scale_min >= table.rank_scale_max {
        return Err(ConfigError::ValidationError {
            field: "table.rank_scale_max".into(),
            message: format!(
                "must be greater than rank_scale_min ({}), got {}",
                table.rank_scale_min, table.rank_scale_max
            ),
        });
    }

    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.filter".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
