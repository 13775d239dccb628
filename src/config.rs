//! Runtime configuration.
//!
//! [`AtelierConfig::default`] is suitable for local development. Deployments
//! override individual values through `ATELIER_*` environment variables read
//! by [`AtelierConfig::from_env`]:
//!
//! | Variable                     | Field                          |
//! |------------------------------|--------------------------------|
//! | `ATELIER_DATABASE_URL`       | `database_url`                 |
//! | `ATELIER_DB_POOL_SIZE`       | `pool_size`                    |
//! | `ATELIER_STORAGE_ROOT`       | `storage.root`                 |
//! | `ATELIER_MAX_UPLOAD_BYTES`   | `limits.max_upload_bytes`      |
//! | `ATELIER_MAX_TITLE_CHARS`    | `limits.max_title_chars`       |
//! | `ATELIER_MIN_LOGGED_HOURS`   | `limits.min_logged_hours`      |

use crate::task::domain::Hours;
use camino::Utf8PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed.
    #[error("invalid value {value:?} for {key}")]
    InvalidValue {
        /// Environment variable name.
        key: &'static str,
        /// Raw value.
        value: String,
    },
}

/// Limits enforced by the validation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    /// Largest accepted upload in bytes.
    pub max_upload_bytes: u64,
    /// Longest accepted project name or task title, in characters.
    pub max_title_chars: usize,
    /// Smallest amount of work that can be logged at once.
    pub min_logged_hours: Hours,
}

impl ValidationLimits {
    /// Ten MiB upload cap, 255-character titles, 0.1 hour logging minimum.
    pub const STANDARD: Self = Self {
        max_upload_bytes: 10 * 1024 * 1024,
        max_title_chars: 255,
        min_logged_hours: Hours::from_hundredths(10),
    };
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Blob storage settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory that blob paths are resolved against.
    pub root: Utf8PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: Utf8PathBuf::from("storage"),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtelierConfig {
    /// `PostgreSQL` connection string; `None` selects the in-memory adapters.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: u32,
    /// Blob storage settings.
    pub storage: StorageConfig,
    /// Validation limits.
    pub limits: ValidationLimits,
}

impl Default for AtelierConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_size: 10,
            storage: StorageConfig::default(),
            limits: ValidationLimits::default(),
        }
    }
}

impl AtelierConfig {
    /// In-memory persistence with blobs under `storage_root`.
    #[must_use]
    pub fn in_memory(storage_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            storage: StorageConfig {
                root: storage_root.into(),
            },
            ..Self::default()
        }
    }

    /// Returns whether a database has been configured.
    #[must_use]
    pub const fn uses_database(&self) -> bool {
        self.database_url.is_some()
    }

    /// Reads overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a numeric variable does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads overrides through `lookup`, starting from the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a numeric value does not
    /// parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup("ATELIER_DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            config.database_url = Some(url);
        }
        if let Some(size) = parsed(&lookup, "ATELIER_DB_POOL_SIZE")? {
            config.pool_size = size;
        }
        if let Some(root) = lookup("ATELIER_STORAGE_ROOT") {
            config.storage.root = Utf8PathBuf::from(root);
        }
        if let Some(bytes) = parsed(&lookup, "ATELIER_MAX_UPLOAD_BYTES")? {
            config.limits.max_upload_bytes = bytes;
        }
        if let Some(chars) = parsed(&lookup, "ATELIER_MAX_TITLE_CHARS")? {
            config.limits.max_title_chars = chars;
        }
        if let Some(raw) = lookup("ATELIER_MIN_LOGGED_HOURS") {
            let invalid = || ConfigError::InvalidValue {
                key: "ATELIER_MIN_LOGGED_HOURS",
                value: raw.clone(),
            };
            let hours = raw.trim().parse::<f64>().map_err(|_| invalid())?;
            config.limits.min_logged_hours = Hours::from_f64(hours).map_err(|_| invalid())?;
        }
        Ok(config)
    }
}

fn parsed<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError> {
    lookup(key)
        .map(|value| {
            value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidValue { key, value })
        })
        .transpose()
}
